use crate::{
    AppState,
    errors::BoardError,
    models::{Comment, CommentDraft},
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

/// GET /posts/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<Comment>>, BoardError> {
    Ok(Json(state.comments.list_by_post(&post_id).await?))
}

/// POST /posts/{id}/comments
/// Headers: Authorization: Bearer <token>
/// Body: { "content": "..." }
pub async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<String>,
    Json(payload): Json<CommentDraft>,
) -> Result<(StatusCode, Json<Comment>), BoardError> {
    let actor = state.actor(&headers)?;

    let id = state
        .comments
        .create(actor.as_ref(), &post_id, &payload.content)
        .await?;
    let comment = state.comments.get(&id).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /comments/{id}
/// Headers: Authorization: Bearer <token>
pub async fn delete_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, BoardError> {
    let actor = state.actor(&headers)?.ok_or(BoardError::AuthRequired)?;

    let comment = state.comments.get(&id).await?;
    state
        .comments
        .delete(Some(&actor), &id, &comment.author_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
