use serde::{Deserialize, Serialize};

use peopleops_core::{DomainError, DomainResult, UserId};

use crate::Role;

/// A fully resolved actor for authorization decisions.
///
/// Construction is decoupled from storage and transport: the HTTP layer
/// resolves credentials to a directory record and builds this from it. Core
/// operations never parse credentials themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
    /// GDPR-style opt-in flag gating personal-data processing.
    pub consent: bool,
    pub manager_id: Option<UserId>,
    pub team_members: Vec<UserId>,
}

impl Actor {
    /// Snapshot view of team membership (resolved at request time).
    ///
    /// Operations that must observe *current* membership (e.g. a leave
    /// decision racing an erasure) re-check the directory under the store
    /// lock instead of trusting this snapshot.
    pub fn is_manager_of(&self, employee_id: &UserId) -> bool {
        self.team_members.contains(employee_id)
    }

    /// Fail-closed role allow-list, checked before any side effect.
    pub fn require_role(&self, allowed: &[Role]) -> DomainResult<()> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(DomainError::forbidden("insufficient role permissions"))
        }
    }
}
