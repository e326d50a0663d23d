use serde::{Deserialize, Serialize};

use crate::Role;

/// Permission token.
///
/// Permissions form a closed set so the role → permission table below can be
/// checked exhaustively. Wire form is the colon-separated token
/// (e.g. `"workflow:leave:approve:team"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "policy:read")]
    PolicyRead,
    #[serde(rename = "workflow:leave:create")]
    LeaveCreate,
    #[serde(rename = "workflow:leave:approve:any")]
    LeaveApproveAny,
    #[serde(rename = "workflow:leave:approve:team")]
    LeaveApproveTeam,
    #[serde(rename = "workflow:document:request")]
    DocumentRequest,
    #[serde(rename = "workflow:document:fulfill")]
    DocumentFulfill,
    #[serde(rename = "workflow:onboarding:trigger")]
    OnboardingTrigger,
    #[serde(rename = "workflow:onboarding:view")]
    OnboardingView,
    #[serde(rename = "governance:manage")]
    GovernanceManage,
    #[serde(rename = "analytics:view")]
    AnalyticsView,
    #[serde(rename = "users:read")]
    UsersRead,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::PolicyRead => "policy:read",
            Permission::LeaveCreate => "workflow:leave:create",
            Permission::LeaveApproveAny => "workflow:leave:approve:any",
            Permission::LeaveApproveTeam => "workflow:leave:approve:team",
            Permission::DocumentRequest => "workflow:document:request",
            Permission::DocumentFulfill => "workflow:document:fulfill",
            Permission::OnboardingTrigger => "workflow:onboarding:trigger",
            Permission::OnboardingView => "workflow:onboarding:view",
            Permission::GovernanceManage => "governance:manage",
            Permission::AnalyticsView => "analytics:view",
            Permission::UsersRead => "users:read",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static role → permission table.
///
/// Most operations additionally apply explicit actor/target checks (ownership,
/// team membership, consent); this table is the coarse outer gate.
pub fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Hr => &[
            Permission::PolicyRead,
            Permission::LeaveCreate,
            Permission::LeaveApproveAny,
            Permission::DocumentRequest,
            Permission::DocumentFulfill,
            Permission::OnboardingTrigger,
            Permission::GovernanceManage,
            Permission::AnalyticsView,
            Permission::UsersRead,
        ],
        Role::Manager => &[
            Permission::PolicyRead,
            Permission::LeaveCreate,
            Permission::LeaveApproveTeam,
            Permission::DocumentRequest,
            Permission::OnboardingView,
            Permission::AnalyticsView,
        ],
        Role::Employee => &[
            Permission::PolicyRead,
            Permission::LeaveCreate,
            Permission::DocumentRequest,
        ],
    }
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    role_permissions(role).contains(&permission)
}
