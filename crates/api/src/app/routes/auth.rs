use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use peopleops_auth::{Actor, Role};
use peopleops_eventlog::EventKind;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::security;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let Some(user) = services.directory.authenticate(&body.username, &body.password) else {
        return errors::unauthorized("incorrect username or password");
    };

    let (access_token, expires_at) =
        match security::issue_token(&services.jwt_secret, &user.id, user.role) {
            Ok(issued) => issued,
            Err(err) => {
                tracing::error!(error = %err, "token encoding failed");
                return errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "token_error",
                    "could not issue token",
                );
            }
        };

    if let Err(err) = services.log.append(
        EventKind::AuthLogin,
        user.id.as_str(),
        user.role,
        serde_json::json!({"username": user.username}),
    ) {
        return errors::log_error_to_response(err);
    }

    (
        StatusCode::OK,
        Json(TokenResponse {
            access_token,
            token_type: "bearer",
            expires_at,
        }),
    )
        .into_response()
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    match services.directory.require_user(&actor.id) {
        Ok(user) => (StatusCode::OK, Json(user.as_public())).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<Actor>,
) -> axum::response::Response {
    if let Err(err) = actor.require_role(&[Role::Hr]) {
        return errors::domain_error_to_response(err);
    }
    (StatusCode::OK, Json(services.directory.list_users())).into_response()
}
