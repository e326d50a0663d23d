//! `peopleops-workflow` — leave, document and onboarding state machines.
//!
//! Every mutating operation follows the same shape: role/consent gate first
//! (fail closed, nothing written on rejection), then one closure over the
//! record store holding the lock for the whole read-check-write sequence,
//! then event log appends after the lock is released.

use std::sync::Arc;

use thiserror::Error;

use peopleops_auth::{Actor, Role};
use peopleops_core::{DomainError, UserId};
use peopleops_eventlog::{EventLog, LogError};
use peopleops_store::RecordStore;

pub mod documents;
pub mod leave;
pub mod onboarding;

pub use documents::DocumentRequestCreate;
pub use leave::{LeaveDecision, LeaveRequestCreate};
pub use onboarding::OnboardingTrigger;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Log(#[from] LogError),
}

#[derive(Debug, Clone)]
pub struct WorkflowService {
    store: Arc<RecordStore>,
    log: Arc<EventLog>,
}

impl WorkflowService {
    pub fn new(store: Arc<RecordStore>, log: Arc<EventLog>) -> Self {
        Self { store, log }
    }

    /// Role-based listing visibility, shared by all three record kinds:
    /// HR sees everything, a manager sees their team plus themself, an
    /// employee sees only their own records.
    fn can_view(actor: &Actor, employee_id: &UserId) -> bool {
        match actor.role {
            Role::Hr => true,
            Role::Manager => employee_id == &actor.id || actor.is_manager_of(employee_id),
            Role::Employee => employee_id == &actor.id,
        }
    }
}
