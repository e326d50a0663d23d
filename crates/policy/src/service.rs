use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use peopleops_auth::Actor;
use peopleops_core::{DomainError, PolicyId, ResponseId};
use peopleops_eventlog::{EventKind, EventLog, LogError};
use peopleops_governance::ensure_consent;
use peopleops_store::{PolicyResponse, RecordStore};

use crate::document::PolicyDocument;
use crate::index::{PolicyIndex, cosine_similarity, tokenize};
use crate::sanitize::sanitize_question;

/// Escalation threshold on the top score: below it, no answer is composed.
const LOW_SCORE_THRESHOLD: f64 = 0.08;
/// Flat boost when the actor's role name appears in the document audience.
const AUDIENCE_BOOST: f64 = 0.08;
/// Per-tag boost when a tag appears verbatim in the raw question.
const TAG_BOOST: f64 = 0.03;
const CONFIDENCE_FLOOR: f64 = 0.2;
const CONFIDENCE_CEILING: f64 = 0.99;
const CONFIDENCE_LIFT: f64 = 0.25;

const ESCALATION_ANSWER: &str = "No direct policy match was found with high confidence. \
     Escalate to HR for interpretation and policy exception handling.";
const PROCEDURAL_REMINDER: &str =
    "Follow the documented approval chain and record all actions in the workflow log.";
const GOVERNANCE_NOTICE: &str = "Output is policy guidance only. Personal data is redacted \
     in analytics logs and subject to GDPR controls.";

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Log(#[from] LogError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyCitation {
    pub policy_id: PolicyId,
    pub title: String,
}

impl From<&PolicyDocument> for PolicyCitation {
    fn from(doc: &PolicyDocument) -> Self {
        Self {
            policy_id: doc.policy_id.clone(),
            title: doc.title.clone(),
        }
    }
}

/// Answer returned to the caller. The answer text itself is NOT sanitized;
/// sanitization applies to what gets stored and logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyAnswer {
    pub response_id: ResponseId,
    pub answer: String,
    pub confidence: f64,
    pub citations: Vec<PolicyCitation>,
    pub governance_notice: String,
}

#[derive(Debug)]
pub struct PolicyService {
    documents: Vec<PolicyDocument>,
    index: PolicyIndex,
    store: Arc<RecordStore>,
    log: Arc<EventLog>,
}

impl PolicyService {
    pub fn new(documents: Vec<PolicyDocument>, store: Arc<RecordStore>, log: Arc<EventLog>) -> Self {
        let index = PolicyIndex::build(&documents);
        Self {
            documents,
            index,
            store,
            log,
        }
    }

    /// The full corpus, in dataset order.
    pub fn documents(&self) -> &[PolicyDocument] {
        &self.documents
    }

    /// Answer a free-text question against the corpus.
    ///
    /// Consent is checked before any scoring runs. Every query persists a
    /// response receipt (for later feedback validation) and appends a
    /// `policy_query` event carrying the sanitized question.
    pub fn query(&self, actor: &Actor, question: &str) -> Result<PolicyAnswer, PolicyError> {
        ensure_consent(actor, "policy_assistance")?;

        let question_vector = tokenize(question);
        let question_lower = question.to_lowercase();
        let role_keyword = actor.role.as_str().to_lowercase();

        let mut scored: Vec<(&PolicyDocument, f64)> = self
            .documents
            .iter()
            .map(|doc| {
                let base = self
                    .index
                    .vector(&doc.policy_id)
                    .map(|v| cosine_similarity(&question_vector, v))
                    .unwrap_or(0.0);
                let audience_boost = if doc.audience.to_lowercase().contains(&role_keyword) {
                    AUDIENCE_BOOST
                } else {
                    0.0
                };
                let tag_hits = doc
                    .tags
                    .iter()
                    .filter(|tag| question_lower.contains(&tag.to_lowercase()))
                    .count();
                // Raw score is deliberately unclamped; only the final
                // confidence rule bounds the reported value.
                (doc, base + audience_boost + TAG_BOOST * tag_hits as f64)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(core::cmp::Ordering::Equal));

        let Some(&(top_doc, top_score)) = scored.first() else {
            return Err(DomainError::validation("policy corpus is empty").into());
        };

        let (answer, citations, confidence) = if top_score < LOW_SCORE_THRESHOLD {
            (
                ESCALATION_ANSWER.to_string(),
                vec![PolicyCitation::from(top_doc)],
                round3(top_score.max(CONFIDENCE_FLOOR)),
            )
        } else {
            let answer = format!(
                "Based on '{}', {} {}",
                top_doc.title, top_doc.content, PROCEDURAL_REMINDER
            );
            let citations = scored
                .iter()
                .take(2)
                .map(|(doc, _)| PolicyCitation::from(*doc))
                .collect();
            (
                answer,
                citations,
                round3((top_score + CONFIDENCE_LIFT).min(CONFIDENCE_CEILING)),
            )
        };

        let response_id = ResponseId::generate();
        let sanitized = sanitize_question(question);
        let citation_ids: Vec<PolicyId> =
            citations.iter().map(|c: &PolicyCitation| c.policy_id.clone()).collect();

        self.store.with(|t| {
            t.policy_responses.insert(
                response_id.clone(),
                PolicyResponse {
                    user_id: actor.id.clone(),
                    question: sanitized.clone(),
                    citations: citation_ids.clone(),
                    confidence,
                },
            );
        });

        self.log.append(
            EventKind::PolicyQuery,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "response_id": response_id.as_str(),
                "question": sanitized,
                "confidence": confidence,
                "citations": citation_ids,
            }),
        )?;

        Ok(PolicyAnswer {
            response_id,
            answer,
            confidence,
            citations,
            governance_notice: GOVERNANCE_NOTICE.to_string(),
        })
    }

    /// Record accuracy feedback against a previously issued response.
    ///
    /// Unknown response ids fail NotFound with no event appended; the receipt
    /// itself is never mutated.
    pub fn record_feedback(
        &self,
        actor: &Actor,
        response_id: &ResponseId,
        accurate: bool,
        comment: Option<&str>,
    ) -> Result<(), PolicyError> {
        let exists = self
            .store
            .with(|t| t.policy_responses.contains_key(response_id));
        if !exists {
            return Err(DomainError::not_found("response_id not found").into());
        }

        self.log.append(
            EventKind::PolicyFeedback,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "response_id": response_id.as_str(),
                "accurate": accurate,
                "comment": comment.unwrap_or(""),
            }),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use tempfile::TempDir;

    use peopleops_auth::Role;
    use peopleops_core::UserId;

    fn doc(id: &str, title: &str, audience: &str, content: &str, tags: &[&str]) -> PolicyDocument {
        PolicyDocument {
            policy_id: PolicyId::new(id),
            title: title.to_string(),
            category: "Workplace".to_string(),
            audience: audience.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            last_updated: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        }
    }

    fn corpus() -> Vec<PolicyDocument> {
        vec![
            doc(
                "pol-remote-001",
                "Remote Work Policy",
                "All employees",
                "Employees may work remotely up to three days per week. Home office \
                 equipment such as monitors and chairs is provided through the remote \
                 work equipment stipend.",
                &["remote work", "home office", "equipment"],
            ),
            doc(
                "pol-expense-001",
                "Travel Expense Policy",
                "All employees",
                "Business travel expenses must be submitted within thirty days with \
                 itemized receipts for reimbursement.",
                &["travel", "expenses"],
            ),
            doc(
                "pol-conduct-001",
                "Code of Conduct",
                "All employees and contractors",
                "Staff are expected to act with integrity and report conflicts of \
                 interest to their manager.",
                &["conduct", "ethics"],
            ),
        ]
    }

    fn service(dir: &TempDir) -> (Arc<RecordStore>, Arc<EventLog>, PolicyService) {
        let store = Arc::new(RecordStore::new());
        let log = Arc::new(EventLog::open(dir.path().join("events.jsonl")).unwrap());
        let service = PolicyService::new(corpus(), store.clone(), log.clone());
        (store, log, service)
    }

    fn employee(consent: bool) -> Actor {
        Actor {
            id: UserId::new("u-emp-001"),
            role: Role::Employee,
            consent,
            manager_id: None,
            team_members: vec![],
        }
    }

    fn hr() -> Actor {
        Actor {
            id: UserId::new("u-hr-001"),
            role: Role::Hr,
            consent: true,
            manager_id: None,
            team_members: vec![],
        }
    }

    #[test]
    fn exact_content_query_ranks_its_document_first() {
        let dir = TempDir::new().unwrap();
        let (_store, _log, service) = service(&dir);

        let question = "Business travel expenses must be submitted within thirty days \
             with itemized receipts for reimbursement.";
        let answer = service.query(&employee(true), question).unwrap();

        assert_eq!(answer.citations[0].policy_id, PolicyId::new("pol-expense-001"));
        assert!(answer.answer.contains("Travel Expense Policy"));
        // Matched path: confidence = min(0.99, top + 0.25) with top ≥ 0.08.
        assert!(answer.confidence >= 0.33);
        assert_eq!(answer.citations.len(), 2);
    }

    #[test]
    fn remote_work_question_hits_remote_policy_with_high_confidence() {
        let dir = TempDir::new().unwrap();
        let (_store, _log, service) = service(&dir);

        let answer = service
            .query(
                &employee(true),
                "What is the remote work policy regarding home office equipment?",
            )
            .unwrap();

        assert_eq!(answer.citations[0].policy_id, PolicyId::new("pol-remote-001"));
        assert!(answer.confidence >= 0.45);
    }

    #[test]
    fn unrelated_question_escalates_with_floor_confidence() {
        let dir = TempDir::new().unwrap();
        let (_store, _log, service) = service(&dir);

        // HR actor: "hr" appears in no test audience, so no audience boost
        // keeps the score below the escalation threshold. (For an EMPLOYEE
        // the flat audience boost alone reaches 0.08 against an
        // "All employees" corpus, which is faithful to the scoring rule.)
        let answer = service
            .query(&hr(), "zzqx vw yk plmnop qrstuv")
            .unwrap();

        assert!(answer.answer.contains("Escalate to HR"));
        assert_eq!(answer.citations.len(), 1);
        assert_eq!(answer.confidence, 0.2);
    }

    #[test]
    fn tag_hits_in_raw_question_boost_the_score() {
        let dir = TempDir::new().unwrap();
        let (_store, _log, service) = service(&dir);

        // Two tag phrases appear verbatim in the raw question; the boosts
        // stack on top of the token overlap and pin the remote policy first.
        let answer = service
            .query(&employee(true), "home office equipment??")
            .unwrap();
        assert_eq!(answer.citations[0].policy_id, PolicyId::new("pol-remote-001"));
        assert!(answer.confidence > 0.33);
    }

    #[test]
    fn audience_boost_applies_when_role_name_is_in_audience() {
        let docs = vec![
            doc("pol-a", "Alpha", "Managers only", "shared words here", &[]),
            doc("pol-b", "Beta", "All employees", "shared words here", &[]),
        ];
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RecordStore::new());
        let log = Arc::new(EventLog::open(dir.path().join("events.jsonl")).unwrap());
        let service = PolicyService::new(docs, store, log);

        // Identical cosine for both; the employee audience boost breaks the tie.
        let answer = service.query(&employee(true), "shared words here").unwrap();
        assert_eq!(answer.citations[0].policy_id, PolicyId::new("pol-b"));
    }

    #[test]
    fn query_persists_receipt_and_sanitized_event() {
        let dir = TempDir::new().unwrap();
        let (store, log, service) = service(&dir);

        let answer = service
            .query(
                &employee(true),
                "Can I expense travel? Reach me at alex@example.com, badge 9876543",
            )
            .unwrap();

        let receipt = store.with(|t| t.policy_responses[&answer.response_id].clone());
        assert!(receipt.question.contains("[REDACTED_EMAIL]"));
        assert!(receipt.question.contains("[REDACTED_NUMBER]"));
        assert_eq!(receipt.confidence, answer.confidence);

        let events = log.read_all().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventKind::PolicyQuery);
        let logged_question = events[0].details["question"].as_str().unwrap();
        assert_eq!(logged_question, receipt.question);
        assert!(!logged_question.contains("alex@example.com"));
        // The returned answer is not sanitized.
        assert!(!answer.answer.contains("[REDACTED_EMAIL]"));
    }

    #[test]
    fn consent_is_checked_before_any_side_effect() {
        let dir = TempDir::new().unwrap();
        let (store, log, service) = service(&dir);

        let err = service
            .query(&employee(false), "What is the remote work policy?")
            .unwrap_err();
        assert!(matches!(err, PolicyError::Domain(DomainError::Forbidden(_))));

        assert!(store.with(|t| t.policy_responses.is_empty()));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn feedback_for_unknown_response_id_is_not_found_and_unlogged() {
        let dir = TempDir::new().unwrap();
        let (_store, log, service) = service(&dir);

        let err = service
            .record_feedback(&employee(true), &ResponseId::new("pol-missing"), true, None)
            .unwrap_err();
        assert!(matches!(err, PolicyError::Domain(DomainError::NotFound(_))));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn feedback_appends_event_and_leaves_receipt_untouched() {
        let dir = TempDir::new().unwrap();
        let (store, log, service) = service(&dir);

        let answer = service
            .query(&employee(true), "How do I expense business travel receipts?")
            .unwrap();
        let before = store.with(|t| t.policy_responses[&answer.response_id].clone());

        service
            .record_feedback(&employee(true), &answer.response_id, false, Some("too vague"))
            .unwrap();

        let after = store.with(|t| t.policy_responses[&answer.response_id].clone());
        assert_eq!(before, after);

        let events = log.read_all().unwrap();
        assert_eq!(events.last().unwrap().event_type, EventKind::PolicyFeedback);
        assert_eq!(events.last().unwrap().details["accurate"], false);
    }

    proptest! {
        #[test]
        fn confidence_is_always_within_bounds(question in ".{0,200}") {
            let dir = TempDir::new().unwrap();
            let store = Arc::new(RecordStore::new());
            let log = Arc::new(EventLog::open(dir.path().join("events.jsonl")).unwrap());
            let service = PolicyService::new(corpus(), store, log);

            let answer = service.query(&employee(true), &question).unwrap();
            prop_assert!(answer.confidence >= 0.2);
            prop_assert!(answer.confidence <= 0.99);
        }
    }
}
