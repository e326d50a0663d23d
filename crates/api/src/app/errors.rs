use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use peopleops_core::DomainError;
use peopleops_eventlog::LogError;
use peopleops_governance::GovernanceError;
use peopleops_policy::PolicyError;
use peopleops_workflow::WorkflowError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn unauthorized(message: impl Into<String>) -> axum::response::Response {
    json_error(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Unauthorized => unauthorized("could not validate credentials"),
        DomainError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, "forbidden", msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
    }
}

/// Event-log failures are 500s: the log is the integrity backbone, so an
/// operation whose append failed must not report success.
pub fn log_error_to_response(err: LogError) -> axum::response::Response {
    tracing::error!(error = %err, "event log failure");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "event_log_error",
        "event log write failed",
    )
}

pub fn workflow_error_to_response(err: WorkflowError) -> axum::response::Response {
    match err {
        WorkflowError::Domain(e) => domain_error_to_response(e),
        WorkflowError::Log(e) => log_error_to_response(e),
    }
}

pub fn policy_error_to_response(err: PolicyError) -> axum::response::Response {
    match err {
        PolicyError::Domain(e) => domain_error_to_response(e),
        PolicyError::Log(e) => log_error_to_response(e),
    }
}

pub fn governance_error_to_response(err: GovernanceError) -> axum::response::Response {
    match err {
        GovernanceError::Domain(e) => domain_error_to_response(e),
        GovernanceError::Log(e) => log_error_to_response(e),
    }
}
