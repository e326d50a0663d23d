use axum::{
    Router,
    routing::{get, patch, post},
};

pub mod analytics;
pub mod auth;
pub mod governance;
pub mod policy;
pub mod system;
pub mod workflows;

/// Routes that work without a bearer token.
pub fn public_router() -> Router {
    Router::new().route("/auth/token", post(auth::login))
}

/// Routes behind the auth middleware. Each handler additionally enforces its
/// role allow-list before doing anything else.
pub fn protected_router() -> Router {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/users", get(auth::list_users))
        .route("/policy/documents", get(policy::list_documents))
        .route("/policy/query", post(policy::query))
        .route("/policy/feedback", post(policy::feedback))
        .route(
            "/workflows/leave",
            post(workflows::create_leave_request).get(workflows::list_leave_requests),
        )
        .route(
            "/workflows/leave/:request_id/decision",
            post(workflows::decide_leave_request),
        )
        .route(
            "/workflows/documents/request",
            post(workflows::create_document_request),
        )
        .route("/workflows/documents", get(workflows::list_document_requests))
        .route(
            "/workflows/documents/:request_id/fulfill",
            post(workflows::fulfill_document_request),
        )
        .route(
            "/workflows/onboarding/trigger",
            post(workflows::trigger_onboarding),
        )
        .route("/workflows/onboarding", get(workflows::list_onboarding_tasks))
        .route(
            "/governance/consent/:target_user_id",
            patch(governance::update_consent),
        )
        .route(
            "/governance/subject-access/:target_user_id",
            get(governance::subject_access_request),
        )
        .route("/governance/erase/:target_user_id", post(governance::erase_user_data))
        .route(
            "/governance/retention/cleanup",
            post(governance::retention_cleanup),
        )
        .route("/analytics/kpis", get(analytics::kpis))
        .route("/analytics/events", get(analytics::recent_events))
}
