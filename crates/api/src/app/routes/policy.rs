use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use peopleops_auth::{Actor, Role};
use peopleops_core::ResponseId;

use crate::app::errors;
use crate::app::services::AppServices;

#[derive(Debug, Deserialize)]
pub struct PolicyQueryRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct PolicyFeedbackRequest {
    pub response_id: ResponseId,
    pub accurate: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

pub async fn list_documents(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr, Role::Manager, Role::Employee]) {
        return errors::domain_error_to_response(err);
    }
    (StatusCode::OK, Json(services.policy.documents())).into_response()
}

pub async fn query(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<PolicyQueryRequest>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr, Role::Manager, Role::Employee]) {
        return errors::domain_error_to_response(err);
    }
    let question = body.question.trim();
    if question.len() < 10 || question.len() > 500 {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "question must be 10 to 500 characters",
        );
    }

    match services.policy.query(&actor, question) {
        Ok(answer) => (StatusCode::OK, Json(answer)).into_response(),
        Err(err) => errors::policy_error_to_response(err),
    }
}

pub async fn feedback(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<PolicyFeedbackRequest>,
) -> axum::response::Response {
    match services.policy.record_feedback(
        &actor,
        &body.response_id,
        body.accurate,
        body.comment.as_deref(),
    ) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "feedback recorded"})),
        )
            .into_response(),
        Err(err) => errors::policy_error_to_response(err),
    }
}
