use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use peopleops_eventlog::{EventKind, EventLog, EventRecord, LogError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageMetrics {
    pub total_policy_queries: usize,
    pub unique_users: usize,
    pub queries_by_role: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    pub feedback_samples: usize,
    pub accuracy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationMetrics {
    pub total_workflow_actions: u64,
    pub automated_actions: u64,
    pub automation_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub usage: UsageMetrics,
    pub response_accuracy: AccuracyMetrics,
    pub automation: AutomationMetrics,
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn detail_count(record: &EventRecord, key: &str) -> u64 {
    record.details.get(key).and_then(|v| v.as_u64()).unwrap_or(1)
}

#[derive(Debug, Clone)]
pub struct AnalyticsService {
    log: Arc<EventLog>,
}

impl AnalyticsService {
    pub fn new(log: Arc<EventLog>) -> Self {
        Self { log }
    }

    /// Compute all KPIs from a full replay of the event log.
    pub fn kpis(&self) -> Result<Kpis, LogError> {
        let events = self.log.read_all()?;

        let usage_events: Vec<&EventRecord> = events
            .iter()
            .filter(|e| e.event_type == EventKind::PolicyQuery)
            .collect();

        let mut queries_by_role: BTreeMap<String, usize> = BTreeMap::new();
        let mut unique_users: HashSet<&str> = HashSet::new();
        for event in &usage_events {
            *queries_by_role
                .entry(event.actor_role.as_str().to_string())
                .or_insert(0) += 1;
            unique_users.insert(event.actor_id.as_str());
        }

        let feedback_events: Vec<&EventRecord> = events
            .iter()
            .filter(|e| e.event_type == EventKind::PolicyFeedback)
            .collect();
        let accurate = feedback_events
            .iter()
            .filter(|e| e.details.get("accurate").and_then(|v| v.as_bool()) == Some(true))
            .count();

        let manual: u64 = events
            .iter()
            .filter(|e| e.event_type == EventKind::WorkflowAction)
            .map(|e| detail_count(e, "count"))
            .sum();
        let automated: u64 = events
            .iter()
            .filter(|e| e.event_type == EventKind::AutomationEvent)
            .map(|e| detail_count(e, "action_count"))
            .sum();
        let total_actions = manual + automated;

        Ok(Kpis {
            usage: UsageMetrics {
                total_policy_queries: usage_events.len(),
                unique_users: unique_users.len(),
                queries_by_role,
            },
            response_accuracy: AccuracyMetrics {
                feedback_samples: feedback_events.len(),
                accuracy_rate: if feedback_events.is_empty() {
                    0.0
                } else {
                    round4(accurate as f64 / feedback_events.len() as f64)
                },
            },
            automation: AutomationMetrics {
                total_workflow_actions: total_actions,
                automated_actions: automated,
                automation_rate: if total_actions == 0 {
                    0.0
                } else {
                    round4(automated as f64 / total_actions as f64)
                },
            },
        })
    }

    /// The tail of the event log, in arrival order.
    pub fn recent_events(&self, limit: usize) -> Result<Vec<EventRecord>, LogError> {
        self.log.recent(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use peopleops_auth::Role;

    fn service(dir: &TempDir) -> (Arc<EventLog>, AnalyticsService) {
        let log = Arc::new(EventLog::open(dir.path().join("events.jsonl")).unwrap());
        (log.clone(), AnalyticsService::new(log))
    }

    #[test]
    fn empty_log_yields_zeroed_kpis() {
        let dir = TempDir::new().unwrap();
        let (_log, service) = service(&dir);

        let kpis = service.kpis().unwrap();
        assert_eq!(kpis.usage.total_policy_queries, 0);
        assert_eq!(kpis.usage.unique_users, 0);
        assert_eq!(kpis.response_accuracy.accuracy_rate, 0.0);
        assert_eq!(kpis.automation.automation_rate, 0.0);
        assert_eq!(kpis.automation.total_workflow_actions, 0);
    }

    #[test]
    fn usage_counts_queries_and_unique_actors_by_role() {
        let dir = TempDir::new().unwrap();
        let (log, service) = service(&dir);

        for actor in ["u-emp-001", "u-emp-001", "u-emp-002"] {
            log.append(EventKind::PolicyQuery, actor, Role::Employee, serde_json::json!({}))
                .unwrap();
        }
        log.append(EventKind::PolicyQuery, "u-hr-001", Role::Hr, serde_json::json!({}))
            .unwrap();
        // Unrelated kinds do not count as usage.
        log.append(EventKind::AuthLogin, "u-hr-001", Role::Hr, serde_json::json!({}))
            .unwrap();

        let kpis = service.kpis().unwrap();
        assert_eq!(kpis.usage.total_policy_queries, 4);
        assert_eq!(kpis.usage.unique_users, 3);
        assert_eq!(kpis.usage.queries_by_role["EMPLOYEE"], 3);
        assert_eq!(kpis.usage.queries_by_role["HR"], 1);
    }

    #[test]
    fn accuracy_rate_is_accurate_over_samples() {
        let dir = TempDir::new().unwrap();
        let (log, service) = service(&dir);

        for accurate in [true, true, false] {
            log.append(
                EventKind::PolicyFeedback,
                "u-emp-001",
                Role::Employee,
                serde_json::json!({"response_id": "pol-x", "accurate": accurate}),
            )
            .unwrap();
        }

        let kpis = service.kpis().unwrap();
        assert_eq!(kpis.response_accuracy.feedback_samples, 3);
        assert_eq!(kpis.response_accuracy.accuracy_rate, 0.6667);
    }

    #[test]
    fn automation_rate_splits_manual_and_automated_streams() {
        let dir = TempDir::new().unwrap();
        let (log, service) = service(&dir);

        // One leave creation: one manual action plus one automated routing.
        log.append(
            EventKind::WorkflowAction,
            "u-emp-001",
            Role::Employee,
            serde_json::json!({"action": "leave_created", "count": 1}),
        )
        .unwrap();
        log.append(
            EventKind::AutomationEvent,
            "u-emp-001",
            Role::Employee,
            serde_json::json!({"action": "leave_auto_routed", "action_count": 1}),
        )
        .unwrap();
        // One onboarding trigger: one manual action plus a batch of four.
        log.append(
            EventKind::WorkflowAction,
            "u-hr-001",
            Role::Hr,
            serde_json::json!({"action": "onboarding_triggered", "count": 1}),
        )
        .unwrap();
        log.append(
            EventKind::AutomationEvent,
            "u-hr-001",
            Role::Hr,
            serde_json::json!({"action": "onboarding_tasks_auto_created", "action_count": 4}),
        )
        .unwrap();

        let kpis = service.kpis().unwrap();
        assert_eq!(kpis.automation.total_workflow_actions, 7);
        assert_eq!(kpis.automation.automated_actions, 5);
        assert_eq!(kpis.automation.automation_rate, 0.7143);
    }

    #[test]
    fn missing_count_details_default_to_one() {
        let dir = TempDir::new().unwrap();
        let (log, service) = service(&dir);

        log.append(
            EventKind::WorkflowAction,
            "u-emp-001",
            Role::Employee,
            serde_json::json!({"action": "document_requested"}),
        )
        .unwrap();
        log.append(
            EventKind::AutomationEvent,
            "u-emp-001",
            Role::Employee,
            serde_json::json!({"action": "leave_auto_routed"}),
        )
        .unwrap();

        let kpis = service.kpis().unwrap();
        assert_eq!(kpis.automation.total_workflow_actions, 2);
        assert_eq!(kpis.automation.automated_actions, 1);
    }

    #[test]
    fn kpis_are_recomputed_from_the_log_each_time() {
        let dir = TempDir::new().unwrap();
        let (log, service) = service(&dir);

        log.append(
            EventKind::WorkflowAction,
            "u-emp-001",
            Role::Employee,
            serde_json::json!({"count": 1}),
        )
        .unwrap();
        assert_eq!(service.kpis().unwrap().automation.total_workflow_actions, 1);

        // A later append is visible on the very next replay; nothing is cached.
        log.append(
            EventKind::WorkflowAction,
            "u-emp-001",
            Role::Employee,
            serde_json::json!({"count": 2}),
        )
        .unwrap();
        assert_eq!(service.kpis().unwrap().automation.total_workflow_actions, 3);
    }
}
