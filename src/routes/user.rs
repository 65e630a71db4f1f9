use crate::{
    AppState,
    auth::{SignUp, issue_token},
    dto::{AuthResponse, LoginRequest},
    errors::BoardError,
    models::User,
};
use axum::{Json, extract::State, http::{HeaderMap, StatusCode}};
use tracing::info;
use validator::Validate;

/// POST /auth/signup
/// Body: { "email": "...", "password": "...", "passwordConfirm": "..." }
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignUp>,
) -> Result<(StatusCode, Json<User>), BoardError> {
    let user = state.identity.sign_up(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login
/// Body: { "email": "...", "password": "..." }
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BoardError> {
    payload.validate()?;

    let user = state
        .identity
        .sign_in(&payload.email, &payload.password)
        .await?;

    let token = issue_token(&user, &state.jwt_secret, state.token_ttl_hours)?;

    info!("User logged in: {}", user.email);

    Ok(Json(AuthResponse { token, user }))
}

/// GET /users/me
/// Headers: Authorization: Bearer <token>
pub async fn get_current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, BoardError> {
    let actor = state.actor(&headers)?.ok_or(BoardError::AuthRequired)?;

    let user = state
        .identity
        .find_user(&actor.id)
        .await
        .ok_or_else(|| BoardError::NotFound(format!("user {}", actor.id)))?;

    Ok(Json(user))
}
