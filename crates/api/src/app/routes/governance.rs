use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use peopleops_auth::{Actor, Role};
use peopleops_core::UserId;

use crate::app::errors;
use crate::app::services::AppServices;

#[derive(Debug, Deserialize)]
pub struct ConsentUpdateRequest {
    pub consent: bool,
}

#[derive(Debug, Deserialize)]
pub struct RetentionParams {
    #[serde(default)]
    pub retention_days: Option<i64>,
}

const DEFAULT_RETENTION_DAYS: i64 = 365;

pub async fn update_consent(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Path(target_user_id): Path<UserId>,
    Json(body): Json<ConsentUpdateRequest>,
) -> axum::response::Response {
    match services
        .governance
        .update_consent(&actor, &target_user_id, body.consent)
    {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(err) => errors::governance_error_to_response(err),
    }
}

pub async fn subject_access_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Path(target_user_id): Path<UserId>,
) -> axum::response::Response {
    match services
        .governance
        .subject_access_request(&actor, &target_user_id)
    {
        Ok(bundle) => (StatusCode::OK, Json(bundle)).into_response(),
        Err(err) => errors::governance_error_to_response(err),
    }
}

pub async fn erase_user_data(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Path(target_user_id): Path<UserId>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr]) {
        return errors::domain_error_to_response(err);
    }
    match services.governance.erase_user_data(&actor, &target_user_id) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => errors::governance_error_to_response(err),
    }
}

pub async fn retention_cleanup(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<RetentionParams>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr]) {
        return errors::domain_error_to_response(err);
    }
    let retention_days = params.retention_days.unwrap_or(DEFAULT_RETENTION_DAYS);
    match services.governance.retention_cleanup(&actor, retention_days) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => errors::governance_error_to_response(err),
    }
}
