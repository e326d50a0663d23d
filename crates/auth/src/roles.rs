use core::str::FromStr;

use serde::{Deserialize, Serialize};

use peopleops_core::DomainError;

/// Role identifier used for RBAC.
///
/// The role set is closed: three variants, matched exhaustively everywhere a
/// role decision is made. Wire form is the upper-case name (`"HR"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "MANAGER")]
    Manager,
    #[serde(rename = "EMPLOYEE")]
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hr => "HR",
            Role::Manager => "MANAGER",
            Role::Employee => "EMPLOYEE",
        }
    }

    /// True for roles that may carry direct reports.
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Hr | Role::Manager)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HR" => Ok(Role::Hr),
            "MANAGER" => Ok(Role::Manager),
            "EMPLOYEE" => Ok(Role::Employee),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}
