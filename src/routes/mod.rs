mod comment;
mod health;
mod post;
mod user;

pub use comment::{create_comment, delete_comment, list_comments};
pub use health::health_check;
pub use post::{create_post, delete_post, get_post, list_posts, update_post};
pub use user::{get_current_user, login, signup};

use crate::{AppState, config::Config};
use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::{delete, get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Builds the full router: public reads, authenticated writes, and the
/// middleware stack (CORS, tracing, timeout, concurrency limit).
pub fn app(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/users/me", get(get_current_user))
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        )
        .route("/posts/{id}/comments", get(list_comments).post(create_comment))
        .route("/comments/{id}", delete(delete_comment))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .concurrency_limit(config.max_concurrent_requests),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<serde_json::Value>) {
    let status = if err.is::<tower::timeout::error::Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
          "error": err.to_string()
        })),
    )
}
