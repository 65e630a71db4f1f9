use crate::AppState;
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde_json::{Value, json};

/// GET /health
/// 200 with the post count while the posts collection is readable,
/// 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.posts.list().await {
        Ok(posts) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "posts": posts.len(),
                "checkedAt": Utc::now().to_rfc3339(),
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "error": e.to_string(),
                "checkedAt": Utc::now().to_rfc3339(),
            })),
        ),
    }
}
