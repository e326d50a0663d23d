use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use peopleops_auth::{Actor, Role};
use peopleops_core::{DocumentRequestId, LeaveRequestId, UserId};
use peopleops_workflow::{
    DocumentRequestCreate, LeaveDecision, LeaveRequestCreate, OnboardingTrigger,
};

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn create_leave_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<LeaveRequestCreate>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr, Role::Manager, Role::Employee]) {
        return errors::domain_error_to_response(err);
    }
    match services.workflow.create_leave_request(&actor, body) {
        Ok(row) => (StatusCode::CREATED, Json(row)).into_response(),
        Err(err) => errors::workflow_error_to_response(err),
    }
}

pub async fn list_leave_requests(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr, Role::Manager, Role::Employee]) {
        return errors::domain_error_to_response(err);
    }
    (StatusCode::OK, Json(services.workflow.list_leave_requests(&actor))).into_response()
}

pub async fn decide_leave_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Path(request_id): Path<LeaveRequestId>,
    Json(body): Json<LeaveDecision>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr, Role::Manager]) {
        return errors::domain_error_to_response(err);
    }
    match services.workflow.decide_leave_request(&actor, &request_id, body) {
        Ok(row) => (StatusCode::OK, Json(row)).into_response(),
        Err(err) => errors::workflow_error_to_response(err),
    }
}

pub async fn create_document_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<DocumentRequestCreate>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr, Role::Manager, Role::Employee]) {
        return errors::domain_error_to_response(err);
    }
    match services.workflow.create_document_request(&actor, body) {
        Ok(row) => (StatusCode::CREATED, Json(row)).into_response(),
        Err(err) => errors::workflow_error_to_response(err),
    }
}

pub async fn list_document_requests(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr, Role::Manager, Role::Employee]) {
        return errors::domain_error_to_response(err);
    }
    (
        StatusCode::OK,
        Json(services.workflow.list_document_requests(&actor)),
    )
        .into_response()
}

pub async fn fulfill_document_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Path(request_id): Path<DocumentRequestId>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr]) {
        return errors::domain_error_to_response(err);
    }
    match services.workflow.fulfill_document_request(&actor, &request_id) {
        Ok(row) => (StatusCode::OK, Json(row)).into_response(),
        Err(err) => errors::workflow_error_to_response(err),
    }
}

pub async fn trigger_onboarding(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<OnboardingTrigger>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr]) {
        return errors::domain_error_to_response(err);
    }
    match services.workflow.trigger_onboarding(&actor, body) {
        Ok(tasks) => (StatusCode::CREATED, Json(tasks)).into_response(),
        Err(err) => errors::workflow_error_to_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct OnboardingListParams {
    #[serde(default)]
    pub employee_id: Option<UserId>,
}

pub async fn list_onboarding_tasks(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<OnboardingListParams>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr, Role::Manager, Role::Employee]) {
        return errors::domain_error_to_response(err);
    }
    (
        StatusCode::OK,
        Json(
            services
                .workflow
                .list_onboarding_tasks(&actor, params.employee_id.as_ref()),
        ),
    )
        .into_response()
}
