//! Typed storage rows for every entity the store owns.
//!
//! These are concrete tagged record types; conversions to external response
//! shapes are explicit mapping functions with no implicit field drops.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use peopleops_auth::{Actor, Role};
use peopleops_core::{DocumentRequestId, LeaveRequestId, OnboardingTaskId, PolicyId, UserId};

/// Directory entry for a user.
///
/// Never structurally deleted: erasure anonymizes the row in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub manager_id: Option<UserId>,
    pub team_members: Vec<UserId>,
    pub consent: bool,
    pub password_digest: String,
}

impl UserRecord {
    /// External profile shape (credential digest dropped, nothing else).
    pub fn as_public(&self) -> UserPublic {
        UserPublic {
            user_id: self.id.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            manager_id: self.manager_id.clone(),
            team_members: self.team_members.clone(),
            consent: self.consent,
        }
    }

    /// Resolved actor context for core operations.
    pub fn as_actor(&self) -> Actor {
        Actor {
            id: self.id.clone(),
            role: self.role,
            consent: self.consent,
            manager_id: self.manager_id.clone(),
            team_members: self.team_members.clone(),
        }
    }
}

/// Public profile: what every non-credential consumer sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublic {
    pub user_id: UserId,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub manager_id: Option<UserId>,
    pub team_members: Vec<UserId>,
    pub consent: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
        }
    }

    /// Terminal statuses are retention-eligible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LeaveStatus::Approved | LeaveStatus::Rejected)
    }
}

/// A leave-of-absence request.
///
/// Status moves PENDING→APPROVED or PENDING→REJECTED exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: LeaveRequestId,
    pub employee_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    /// Routing hint while pending; cleared by the decision.
    pub pending_approver_role: Option<Role>,
    pub decision_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    Requested,
    Fulfilled,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Requested => "REQUESTED",
            DocumentStatus::Fulfilled => "FULFILLED",
        }
    }
}

/// An employee document request (employment letter, payslip copy, ...).
///
/// `fulfilled_at` is set iff status is FULFILLED.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub id: DocumentRequestId,
    pub employee_id: UserId,
    pub document_type: String,
    pub purpose: String,
    pub status: DocumentStatus,
    pub requested_at: DateTime<Utc>,
    pub fulfilled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Open,
    Done,
}

/// Owner of an onboarding task.
///
/// Wider than [`Role`]: IT owns provisioning but is not an API role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskOwner {
    Hr,
    It,
    Manager,
    Employee,
}

/// One onboarding checklist task.
///
/// Tasks are only ever created in fixed-template batches per trigger, never
/// individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingTask {
    pub id: OnboardingTaskId,
    pub employee_id: UserId,
    pub title: String,
    pub owner_role: TaskOwner,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    pub trigger_source: String,
    pub created_at: DateTime<Utc>,
}

/// Ephemeral receipt of a prior policy answer.
///
/// Kept only so later feedback can be validated against a real response id;
/// never exposed for listing. The stored question is already sanitized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyResponse {
    pub user_id: UserId,
    pub question: String,
    pub citations: Vec<PolicyId>,
    pub confidence: f64,
}
