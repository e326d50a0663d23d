use std::collections::HashMap;
use std::sync::Mutex;

use peopleops_core::{DocumentRequestId, LeaveRequestId, OnboardingTaskId, ResponseId, UserId};

use crate::records::{DocumentRequest, LeaveRequest, OnboardingTask, PolicyResponse, UserRecord};

/// All mutable collections, owned exclusively by [`RecordStore`].
#[derive(Debug, Default)]
pub struct Tables {
    pub users: HashMap<UserId, UserRecord>,
    pub leave_requests: HashMap<LeaveRequestId, LeaveRequest>,
    pub document_requests: HashMap<DocumentRequestId, DocumentRequest>,
    pub onboarding_tasks: HashMap<OnboardingTaskId, OnboardingTask>,
    pub policy_responses: HashMap<ResponseId, PolicyResponse>,
}

impl Tables {
    /// Current team membership relation, read inside the lock.
    ///
    /// Decision paths must use this rather than an actor snapshot so that a
    /// membership change (e.g. erasure clearing a team) is observed by the
    /// very next decision.
    pub fn is_manager_of(&self, manager_id: &UserId, employee_id: &UserId) -> bool {
        self.users
            .get(manager_id)
            .map(|m| m.team_members.contains(employee_id))
            .unwrap_or(false)
    }
}

/// The single shared record store.
///
/// One mutex guards all tables. The only access path is [`RecordStore::with`],
/// which holds the lock for the whole closure, so every read-check-write
/// sequence expressed as one closure is atomic: no lost updates, no observer
/// of intermediate state. Never append to the event log from inside the
/// closure; log after it returns so the two locks are not held together.
#[derive(Debug, Default)]
pub struct RecordStore {
    inner: Mutex<Tables>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to all tables.
    pub fn with<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut tables = self.inner.lock().expect("record store lock poisoned");
        f(&mut tables)
    }
}
