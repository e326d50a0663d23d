use chrono::Utc;
use serde::{Deserialize, Serialize};

use peopleops_auth::{Actor, Role};
use peopleops_core::{DocumentRequestId, DomainError};
use peopleops_eventlog::EventKind;
use peopleops_governance::ensure_consent;
use peopleops_store::{DocumentRequest, DocumentStatus};

use crate::{WorkflowError, WorkflowService};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequestCreate {
    pub document_type: String,
    pub purpose: String,
}

impl WorkflowService {
    /// Request a document (employment letter, payslip copy, ...) for the
    /// acting user.
    pub fn create_document_request(
        &self,
        actor: &Actor,
        payload: DocumentRequestCreate,
    ) -> Result<DocumentRequest, WorkflowError> {
        ensure_consent(actor, "document_request")?;

        let document_type = payload.document_type.trim();
        if document_type.len() < 3 || document_type.len() > 80 {
            return Err(
                DomainError::validation("document_type must be 3 to 80 characters").into(),
            );
        }
        let purpose = payload.purpose.trim();
        if purpose.len() < 5 || purpose.len() > 200 {
            return Err(DomainError::validation("purpose must be 5 to 200 characters").into());
        }

        let row = DocumentRequest {
            id: DocumentRequestId::generate(),
            employee_id: actor.id.clone(),
            document_type: document_type.to_string(),
            purpose: purpose.to_string(),
            status: DocumentStatus::Requested,
            requested_at: Utc::now(),
            fulfilled_at: None,
        };

        self.store.with(|t| {
            t.document_requests.insert(row.id.clone(), row.clone());
        });

        self.log.append(
            EventKind::WorkflowAction,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "action": "document_requested",
                "request_id": row.id.as_str(),
                "count": 1,
            }),
        )?;

        Ok(row)
    }

    /// Mark a document request fulfilled. HR-only.
    ///
    /// Re-fulfilling an already fulfilled request is not rejected; it
    /// overwrites the fulfillment timestamp. See DESIGN.md.
    pub fn fulfill_document_request(
        &self,
        actor: &Actor,
        request_id: &DocumentRequestId,
    ) -> Result<DocumentRequest, WorkflowError> {
        actor.require_role(&[Role::Hr])?;

        let updated = self.store.with(|t| {
            let row = t
                .document_requests
                .get_mut(request_id)
                .ok_or_else(|| DomainError::not_found("document request not found"))?;
            row.status = DocumentStatus::Fulfilled;
            row.fulfilled_at = Some(Utc::now());
            Ok::<_, DomainError>(row.clone())
        })?;

        self.log.append(
            EventKind::WorkflowAction,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "action": "document_fulfilled",
                "request_id": request_id.as_str(),
                "count": 1,
            }),
        )?;

        Ok(updated)
    }

    /// Document requests visible to the actor, oldest first.
    pub fn list_document_requests(&self, actor: &Actor) -> Vec<DocumentRequest> {
        let mut rows = self.store.with(|t| {
            t.document_requests
                .values()
                .filter(|r| Self::can_view(actor, &r.employee_id))
                .cloned()
                .collect::<Vec<_>>()
        });
        rows.sort_by(|a, b| {
            a.requested_at
                .cmp(&b.requested_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        rows
    }
}
