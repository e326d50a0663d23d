use axum::{Json, http::StatusCode, response::IntoResponse};

pub async fn health() -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({"status": "ok", "service": "peopleops-api"})),
    )
        .into_response()
}
