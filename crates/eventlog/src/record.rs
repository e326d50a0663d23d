use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use peopleops_auth::Role;

/// Event type tag.
///
/// `WorkflowAction` vs `AutomationEvent` is load-bearing: analytics splits the
/// two streams to compute the automation rate, so system-generated batches
/// must never be logged under the manual tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    AuthLogin,
    PolicyQuery,
    PolicyFeedback,
    WorkflowAction,
    AutomationEvent,
    GovernanceEvent,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::AuthLogin => "auth_login",
            EventKind::PolicyQuery => "policy_query",
            EventKind::PolicyFeedback => "policy_feedback",
            EventKind::WorkflowAction => "workflow_action",
            EventKind::AutomationEvent => "automation_event",
            EventKind::GovernanceEvent => "governance_event",
        }
    }
}

/// A single log record: one JSON line in the backing file.
///
/// `actor_id` is a plain string (not a typed id): after an erasure the log may
/// legitimately carry anonymized handles that reference no directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    pub event_type: EventKind,
    pub actor_id: String,
    pub actor_role: Role,
    pub details: serde_json::Value,
}
