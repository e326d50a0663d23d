use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use peopleops_auth::{Actor, Role};
use peopleops_core::{DomainError, LeaveRequestId};
use peopleops_eventlog::EventKind;
use peopleops_governance::ensure_consent;
use peopleops_store::{LeaveRequest, LeaveStatus, Tables};

use crate::{WorkflowError, WorkflowService};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestCreate {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDecision {
    pub approve: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkflowService {
    /// Submit a leave request for the acting user.
    ///
    /// Requests route to the requester's manager when the requester is an
    /// employee, otherwise straight to HR.
    pub fn create_leave_request(
        &self,
        actor: &Actor,
        payload: LeaveRequestCreate,
    ) -> Result<LeaveRequest, WorkflowError> {
        ensure_consent(actor, "leave_request")?;

        if payload.end_date < payload.start_date {
            return Err(DomainError::validation("end_date must be on or after start_date").into());
        }
        let reason = payload.reason.trim();
        if reason.len() < 5 || reason.len() > 250 {
            return Err(DomainError::validation("reason must be 5 to 250 characters").into());
        }
        let today = Utc::now().date_naive();
        if payload.start_date < today - Duration::days(1) {
            return Err(DomainError::validation("start_date cannot be in the past").into());
        }

        let approver_role = if actor.role == Role::Employee {
            Role::Manager
        } else {
            Role::Hr
        };

        let now = Utc::now();
        let row = LeaveRequest {
            id: LeaveRequestId::generate(),
            employee_id: actor.id.clone(),
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: reason.to_string(),
            status: LeaveStatus::Pending,
            pending_approver_role: Some(approver_role),
            decision_notes: None,
            created_at: now,
            updated_at: now,
        };

        self.store.with(|t| {
            t.leave_requests.insert(row.id.clone(), row.clone());
        });

        self.log.append(
            EventKind::WorkflowAction,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "action": "leave_created",
                "request_id": row.id.as_str(),
                "count": 1,
            }),
        )?;
        self.log.append(
            EventKind::AutomationEvent,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "action": "leave_auto_routed",
                "request_id": row.id.as_str(),
                "action_count": 1,
                "target_approver_role": approver_role.as_str(),
            }),
        )?;

        Ok(row)
    }

    /// Approve or reject a pending leave request.
    ///
    /// The whole read-check-write runs inside one store lock acquisition so a
    /// concurrent second decision observes the terminal status, never an
    /// intermediate state. Team membership is re-read from the directory
    /// here, not taken from the actor snapshot.
    pub fn decide_leave_request(
        &self,
        actor: &Actor,
        request_id: &LeaveRequestId,
        decision: LeaveDecision,
    ) -> Result<LeaveRequest, WorkflowError> {
        let updated = self.store.with(|t| {
            let Tables {
                leave_requests,
                users,
                ..
            } = t;

            let row = leave_requests
                .get_mut(request_id)
                .ok_or_else(|| DomainError::not_found("leave request not found"))?;

            if row.status != LeaveStatus::Pending {
                return Err(DomainError::validation("leave request is not pending"));
            }

            if actor.role == Role::Manager {
                let on_team = users
                    .get(&actor.id)
                    .map(|m| m.team_members.contains(&row.employee_id))
                    .unwrap_or(false);
                if !on_team {
                    return Err(DomainError::forbidden(
                        "manager may only decide team member leave",
                    ));
                }
            }
            actor.require_role(&[Role::Hr, Role::Manager])?;

            row.status = if decision.approve {
                LeaveStatus::Approved
            } else {
                LeaveStatus::Rejected
            };
            row.decision_notes = decision.notes.clone();
            row.pending_approver_role = None;
            row.updated_at = Utc::now();

            Ok(row.clone())
        })?;

        self.log.append(
            EventKind::WorkflowAction,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "action": "leave_decision",
                "request_id": request_id.as_str(),
                "decision": updated.status.as_str(),
                "count": 1,
            }),
        )?;

        Ok(updated)
    }

    /// Leave requests visible to the actor, oldest first.
    pub fn list_leave_requests(&self, actor: &Actor) -> Vec<LeaveRequest> {
        let mut rows = self.store.with(|t| {
            t.leave_requests
                .values()
                .filter(|r| Self::can_view(actor, &r.employee_id))
                .cloned()
                .collect::<Vec<_>>()
        });
        rows.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        rows
    }
}
