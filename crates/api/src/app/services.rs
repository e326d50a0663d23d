use std::sync::Arc;

use anyhow::Context;

use peopleops_analytics::AnalyticsService;
use peopleops_eventlog::EventLog;
use peopleops_governance::GovernanceService;
use peopleops_policy::PolicyService;
use peopleops_store::{RecordStore, UserDirectory, seed};
use peopleops_workflow::WorkflowService;

use crate::config::Settings;

/// Everything the handlers need, built once at startup.
pub struct AppServices {
    pub jwt_secret: String,
    pub store: Arc<RecordStore>,
    pub log: Arc<EventLog>,
    pub directory: UserDirectory,
    pub policy: PolicyService,
    pub workflow: WorkflowService,
    pub governance: GovernanceService,
    pub analytics: AnalyticsService,
}

pub fn build_services(settings: &Settings) -> anyhow::Result<AppServices> {
    let store = Arc::new(RecordStore::new());
    seed::seed_demo_users(&store);

    let log = Arc::new(
        EventLog::open(settings.event_log_path.clone()).context("opening event log")?,
    );

    let documents = peopleops_policy::load_dataset(&settings.policy_dataset_path)
        .context("loading policy dataset")?;
    tracing::info!(count = documents.len(), "policy corpus loaded");

    Ok(AppServices {
        jwt_secret: settings.jwt_secret.clone(),
        directory: UserDirectory::new(store.clone()),
        policy: PolicyService::new(documents, store.clone(), log.clone()),
        workflow: WorkflowService::new(store.clone(), log.clone()),
        governance: GovernanceService::new(store.clone(), log.clone()),
        analytics: AnalyticsService::new(log.clone()),
        store,
        log,
    })
}
