use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use peopleops_auth::{Actor, Role};

use crate::app::errors;
use crate::app::services::AppServices;

#[derive(Debug, Deserialize)]
pub struct EventsParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

const DEFAULT_EVENT_LIMIT: usize = 100;
const MAX_EVENT_LIMIT: usize = 1000;

pub async fn kpis(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr, Role::Manager]) {
        return errors::domain_error_to_response(err);
    }
    match services.analytics.kpis() {
        Ok(kpis) => (StatusCode::OK, Json(kpis)).into_response(),
        Err(err) => errors::log_error_to_response(err),
    }
}

pub async fn recent_events(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<EventsParams>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr]) {
        return errors::domain_error_to_response(err);
    }
    let limit = params.limit.unwrap_or(DEFAULT_EVENT_LIMIT).clamp(1, MAX_EVENT_LIMIT);
    match services.analytics.recent_events(limit) {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(err) => errors::log_error_to_response(err),
    }
}
