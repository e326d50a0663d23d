use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use peopleops_core::UserId;
use peopleops_store::{DocumentRequest, LeaveRequest, OnboardingTask, UserPublic};

/// Everything held about one data subject, aggregated read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectAccessBundle {
    pub user_profile: UserPublic,
    pub leave_requests: Vec<LeaveRequest>,
    pub document_requests: Vec<DocumentRequest>,
    pub onboarding_tasks: Vec<OnboardingTask>,
}

/// Outcome of an erasure run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErasureReport {
    pub user_id: UserId,
    pub anonymized_at: DateTime<Utc>,
    pub records_updated: usize,
}

/// Outcome of a retention sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionReport {
    pub retention_days: i64,
    pub removed_events: usize,
    pub workflow_records_anonymized: usize,
}
