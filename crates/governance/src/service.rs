use std::sync::Arc;

use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use thiserror::Error;

use peopleops_auth::{Actor, Role};
use peopleops_core::{DomainError, UserId};
use peopleops_eventlog::{EventKind, EventLog, LogError};
use peopleops_store::RecordStore;

use crate::types::{ErasureReport, RetentionReport, SubjectAccessBundle};

const ANONYMIZED_NAME: &str = "Anonymized User";
const REDACTED: &str = "[REDACTED]";
const REDACTED_RETENTION: &str = "[REDACTED_RETENTION]";
const MIN_RETENTION_DAYS: i64 = 30;

/// Deterministic anonymized handle for a user id.
///
/// One-way: `anon-` plus the first ten hex chars of sha256(id). Re-running
/// erasure for the same id yields the same handle, which is what makes the
/// operation idempotent.
pub fn anonymized_handle(user_id: &UserId) -> String {
    let digest = Sha256::digest(user_id.as_str().as_bytes());
    format!("anon-{:x}", digest)[..("anon-".len() + 10)].to_string()
}

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Log(#[from] LogError),
}

#[derive(Debug, Clone)]
pub struct GovernanceService {
    store: Arc<RecordStore>,
    log: Arc<EventLog>,
}

impl GovernanceService {
    pub fn new(store: Arc<RecordStore>, log: Arc<EventLog>) -> Self {
        Self { store, log }
    }

    fn authorize_subject_scope(actor: &Actor, target: &UserId) -> Result<(), DomainError> {
        if actor.role == Role::Hr || &actor.id == target {
            Ok(())
        } else {
            Err(DomainError::forbidden(
                "only HR or the data subject may perform this",
            ))
        }
    }

    /// Flip the consent flag on a user. HR or the target themself only.
    pub fn update_consent(
        &self,
        actor: &Actor,
        target: &UserId,
        consent: bool,
    ) -> Result<peopleops_store::UserPublic, GovernanceError> {
        Self::authorize_subject_scope(actor, target)?;

        let updated = self.store.with(|t| {
            let user = t
                .users
                .get_mut(target)
                .ok_or_else(|| DomainError::not_found("target user not found"))?;
            user.consent = consent;
            Ok::<_, DomainError>(user.as_public())
        })?;

        self.log.append(
            EventKind::GovernanceEvent,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "action": "consent_update",
                "target_user_id": target.as_str(),
                "consent": consent,
            }),
        )?;

        Ok(updated)
    }

    /// Aggregate everything held about the target. Read-only.
    pub fn subject_access_request(
        &self,
        actor: &Actor,
        target: &UserId,
    ) -> Result<SubjectAccessBundle, GovernanceError> {
        Self::authorize_subject_scope(actor, target)?;

        let bundle = self.store.with(|t| {
            let user = t
                .users
                .get(target)
                .ok_or_else(|| DomainError::not_found("target user not found"))?;

            let mut leave_requests: Vec<_> = t
                .leave_requests
                .values()
                .filter(|r| &r.employee_id == target)
                .cloned()
                .collect();
            leave_requests.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

            let mut document_requests: Vec<_> = t
                .document_requests
                .values()
                .filter(|r| &r.employee_id == target)
                .cloned()
                .collect();
            document_requests.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

            let mut onboarding_tasks: Vec<_> = t
                .onboarding_tasks
                .values()
                .filter(|r| &r.employee_id == target)
                .cloned()
                .collect();
            onboarding_tasks.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

            Ok::<_, DomainError>(SubjectAccessBundle {
                user_profile: user.as_public(),
                leave_requests,
                document_requests,
                onboarding_tasks,
            })
        })?;

        self.log.append(
            EventKind::GovernanceEvent,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "action": "subject_access_request",
                "target_user_id": target.as_str(),
            }),
        )?;

        Ok(bundle)
    }

    /// Irreversibly anonymize the target's identity and workflow records.
    ///
    /// HR-only. The user row stays keyed by the original id; name, username,
    /// consent and team membership are wiped, and every workflow record of
    /// the target is re-referenced to the anonymized handle with its
    /// free-text field redacted.
    pub fn erase_user_data(
        &self,
        actor: &Actor,
        target: &UserId,
    ) -> Result<ErasureReport, GovernanceError> {
        actor.require_role(&[Role::Hr])?;

        let records_updated = self.store.with(|t| {
            let user = t
                .users
                .get_mut(target)
                .ok_or_else(|| DomainError::not_found("target user not found"))?;

            let handle = anonymized_handle(target);
            user.full_name = ANONYMIZED_NAME.to_string();
            user.username = handle.clone();
            user.consent = false;
            user.team_members.clear();

            let anonymized_id = UserId::new(handle);
            let mut updated = 0usize;

            for row in t.leave_requests.values_mut() {
                if &row.employee_id == target {
                    row.employee_id = anonymized_id.clone();
                    row.reason = REDACTED.to_string();
                    updated += 1;
                }
            }
            for row in t.document_requests.values_mut() {
                if &row.employee_id == target {
                    row.employee_id = anonymized_id.clone();
                    row.purpose = REDACTED.to_string();
                    updated += 1;
                }
            }
            for row in t.onboarding_tasks.values_mut() {
                if &row.employee_id == target {
                    row.employee_id = anonymized_id.clone();
                    updated += 1;
                }
            }

            Ok::<_, DomainError>(updated)
        })?;

        self.log.append(
            EventKind::GovernanceEvent,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "action": "erasure",
                "target_user_id": target.as_str(),
                "records_updated": records_updated,
            }),
        )?;

        Ok(ErasureReport {
            user_id: target.clone(),
            anonymized_at: Utc::now(),
            records_updated,
        })
    }

    /// Redact aged terminal workflow records and prune the event log.
    ///
    /// HR-only; periods under 30 days are rejected before anything is
    /// touched. Log pruning is delegated to the event log so this sweep
    /// never holds both locks at once.
    pub fn retention_cleanup(
        &self,
        actor: &Actor,
        retention_days: i64,
    ) -> Result<RetentionReport, GovernanceError> {
        actor.require_role(&[Role::Hr])?;
        if retention_days < MIN_RETENTION_DAYS {
            return Err(DomainError::validation(format!(
                "retention period must be at least {MIN_RETENTION_DAYS} days"
            ))
            .into());
        }

        let cutoff = Utc::now() - Duration::days(retention_days);

        let workflow_records_anonymized = self.store.with(|t| {
            let mut redacted = 0usize;

            for row in t.leave_requests.values_mut() {
                if row.status.is_terminal() && row.updated_at < cutoff {
                    row.reason = REDACTED_RETENTION.to_string();
                    redacted += 1;
                }
            }
            for row in t.document_requests.values_mut() {
                if row.fulfilled_at.is_some_and(|at| at < cutoff) {
                    row.purpose = REDACTED_RETENTION.to_string();
                    redacted += 1;
                }
            }

            redacted
        });

        let removed_events = self.log.purge_older_than(retention_days)?;

        self.log.append(
            EventKind::GovernanceEvent,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "action": "retention_cleanup",
                "retention_days": retention_days,
                "removed_events": removed_events,
                "workflow_records_anonymized": workflow_records_anonymized,
            }),
        )?;

        Ok(RetentionReport {
            retention_days,
            removed_events,
            workflow_records_anonymized,
        })
    }
}
