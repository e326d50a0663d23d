//! Application wiring (Axum router + service construction).
//!
//! Layout mirrors the service crates:
//! - `services.rs`: builds the store, event log and domain services
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::config::Settings;
use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(settings: &Settings) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(settings)?);
    let auth_state = middleware::AuthState {
        services: services.clone(),
    };

    // Protected routes: bearer token resolved to an Actor before any handler.
    let protected = routes::protected_router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    let public = routes::public_router().layer(Extension(services));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(public)
        .merge(protected))
}
