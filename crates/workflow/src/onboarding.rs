use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use peopleops_auth::{Actor, Role};
use peopleops_core::{DomainError, OnboardingTaskId, UserId};
use peopleops_eventlog::EventKind;
use peopleops_store::{OnboardingTask, TaskOwner, TaskStatus};

use crate::{WorkflowError, WorkflowService};

/// The fixed onboarding checklist: title, owning role, due-date offset in
/// days from the start date. Exactly these four tasks per trigger.
const ONBOARDING_TEMPLATES: &[(&str, TaskOwner, i64)] = &[
    ("Complete I-9 verification", TaskOwner::Hr, 0),
    ("Provision laptop and access accounts", TaskOwner::It, 1),
    ("Schedule manager orientation", TaskOwner::Manager, 2),
    ("Acknowledge code of conduct", TaskOwner::Employee, 1),
];

const TRIGGER_SOURCE: &str = "ONBOARDING_TRIGGER";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingTrigger {
    pub employee_id: UserId,
    pub start_date: NaiveDate,
}

impl WorkflowService {
    /// Create the onboarding task batch for an employee. HR-only.
    ///
    /// The existence check and the four inserts run in one critical section
    /// so no reader ever observes a partial batch.
    pub fn trigger_onboarding(
        &self,
        actor: &Actor,
        payload: OnboardingTrigger,
    ) -> Result<Vec<OnboardingTask>, WorkflowError> {
        actor.require_role(&[Role::Hr])?;

        let created = self.store.with(|t| {
            if !t.users.contains_key(&payload.employee_id) {
                return Err(DomainError::not_found("employee not found"));
            }

            let now = Utc::now();
            let mut created = Vec::with_capacity(ONBOARDING_TEMPLATES.len());
            for &(title, owner_role, due_offset) in ONBOARDING_TEMPLATES {
                let task = OnboardingTask {
                    id: OnboardingTaskId::generate(),
                    employee_id: payload.employee_id.clone(),
                    title: title.to_string(),
                    owner_role,
                    due_date: payload.start_date + Duration::days(due_offset),
                    status: TaskStatus::Open,
                    trigger_source: TRIGGER_SOURCE.to_string(),
                    created_at: now,
                };
                t.onboarding_tasks.insert(task.id.clone(), task.clone());
                created.push(task);
            }
            Ok(created)
        })?;

        self.log.append(
            EventKind::WorkflowAction,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "action": "onboarding_triggered",
                "employee_id": payload.employee_id.as_str(),
                "count": 1,
            }),
        )?;
        self.log.append(
            EventKind::AutomationEvent,
            actor.id.as_str(),
            actor.role,
            serde_json::json!({
                "action": "onboarding_tasks_auto_created",
                "employee_id": payload.employee_id.as_str(),
                "action_count": created.len(),
            }),
        )?;

        Ok(created)
    }

    /// Onboarding tasks visible to the actor, optionally narrowed to one
    /// employee. The employee filter applies after the role-based narrowing,
    /// never instead of it.
    pub fn list_onboarding_tasks(
        &self,
        actor: &Actor,
        employee_id: Option<&UserId>,
    ) -> Vec<OnboardingTask> {
        let mut rows = self.store.with(|t| {
            t.onboarding_tasks
                .values()
                .filter(|r| Self::can_view(actor, &r.employee_id))
                .filter(|r| employee_id.is_none_or(|id| &r.employee_id == id))
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    use peopleops_eventlog::EventLog;
    use peopleops_store::{RecordStore, seed};

    fn setup(dir: &TempDir) -> (Arc<RecordStore>, Arc<EventLog>, WorkflowService) {
        let store = Arc::new(RecordStore::new());
        seed::seed_demo_users(&store);
        let log = Arc::new(EventLog::open(dir.path().join("events.jsonl")).unwrap());
        let service = WorkflowService::new(store.clone(), log.clone());
        (store, log, service)
    }

    fn actor_of(store: &RecordStore, id: &str) -> Actor {
        store.with(|t| t.users[&UserId::new(id)].as_actor())
    }

    fn trigger(employee: &str, start: NaiveDate) -> OnboardingTrigger {
        OnboardingTrigger {
            employee_id: UserId::new(employee),
            start_date: start,
        }
    }

    #[test]
    fn trigger_creates_the_four_template_tasks_with_offsets() {
        let dir = TempDir::new().unwrap();
        let (store, _log, service) = setup(&dir);
        let hr = actor_of(&store, "u-hr-001");
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let tasks = service
            .trigger_onboarding(&hr, trigger("u-emp-001", start))
            .unwrap();

        assert_eq!(tasks.len(), 4);
        let due = |i: usize| tasks[i].due_date;
        assert_eq!(due(0), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(due(1), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
        assert_eq!(due(2), NaiveDate::from_ymd_opt(2025, 3, 12).unwrap());
        assert_eq!(due(3), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());

        assert_eq!(tasks[0].owner_role, TaskOwner::Hr);
        assert_eq!(tasks[1].owner_role, TaskOwner::It);
        assert_eq!(tasks[2].owner_role, TaskOwner::Manager);
        assert_eq!(tasks[3].owner_role, TaskOwner::Employee);

        for task in &tasks {
            assert_eq!(task.status, TaskStatus::Open);
            assert_eq!(task.trigger_source, "ONBOARDING_TRIGGER");
            assert_eq!(task.employee_id, UserId::new("u-emp-001"));
        }

        let stored = store.with(|t| t.onboarding_tasks.len());
        assert_eq!(stored, 4);
    }

    #[test]
    fn trigger_is_hr_only() {
        let dir = TempDir::new().unwrap();
        let (store, _log, service) = setup(&dir);
        let mgr = actor_of(&store, "u-mgr-001");
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let err = service
            .trigger_onboarding(&mgr, trigger("u-emp-001", start))
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Domain(DomainError::Forbidden(_))));
    }

    #[test]
    fn trigger_for_unknown_employee_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let (store, log, service) = setup(&dir);
        let hr = actor_of(&store, "u-hr-001");
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let err = service
            .trigger_onboarding(&hr, trigger("u-ghost", start))
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Domain(DomainError::NotFound(_))));

        assert!(store.with(|t| t.onboarding_tasks.is_empty()));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn trigger_logs_manual_action_and_automation_batch() {
        let dir = TempDir::new().unwrap();
        let (store, log, service) = setup(&dir);
        let hr = actor_of(&store, "u-hr-001");
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        service
            .trigger_onboarding(&hr, trigger("u-emp-002", start))
            .unwrap();

        let events = log.read_all().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, EventKind::WorkflowAction);
        assert_eq!(events[0].details["count"], 1);
        assert_eq!(events[1].event_type, EventKind::AutomationEvent);
        assert_eq!(events[1].details["action_count"], 4);
    }

    #[test]
    fn listing_applies_role_visibility_then_employee_filter() {
        let dir = TempDir::new().unwrap();
        let (store, _log, service) = setup(&dir);
        let hr = actor_of(&store, "u-hr-001");
        let alex = actor_of(&store, "u-emp-001");
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        service.trigger_onboarding(&hr, trigger("u-emp-001", start)).unwrap();
        service.trigger_onboarding(&hr, trigger("u-emp-002", start)).unwrap();

        assert_eq!(service.list_onboarding_tasks(&hr, None).len(), 8);
        assert_eq!(
            service
                .list_onboarding_tasks(&hr, Some(&UserId::new("u-emp-002")))
                .len(),
            4
        );

        // The filter cannot widen what the role allows.
        assert_eq!(
            service
                .list_onboarding_tasks(&alex, Some(&UserId::new("u-emp-002")))
                .len(),
            0
        );
        assert_eq!(service.list_onboarding_tasks(&alex, None).len(), 4);
    }
}
