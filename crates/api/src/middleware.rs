use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use peopleops_auth::{Actor, validate_claims};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::security;

#[derive(Clone)]
pub struct AuthState {
    pub services: Arc<AppServices>,
}

/// Resolve the bearer token to an [`Actor`] and stash it in request
/// extensions. Any failure short-circuits with 401 before a handler runs.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match resolve_actor(&state, req.headers()) {
        Ok(actor) => {
            req.extensions_mut().insert(actor);
            next.run(req).await
        }
        Err(response) => response,
    }
}

fn resolve_actor(state: &AuthState, headers: &HeaderMap) -> Result<Actor, Response> {
    let token = extract_bearer(headers)
        .ok_or_else(|| errors::unauthorized("missing or malformed bearer token"))?;

    let claims = security::decode_token(&state.services.jwt_secret, token)
        .map_err(|_| errors::unauthorized("could not validate credentials"))?;

    validate_claims(&claims, Utc::now())
        .map_err(|_| errors::unauthorized("could not validate credentials"))?;

    // The token subject must still resolve to a live directory entry.
    state
        .services
        .directory
        .resolve_actor(&claims.sub)
        .map_err(|_| errors::unauthorized("could not validate credentials"))
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
