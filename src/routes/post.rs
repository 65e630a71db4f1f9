use crate::{
    AppState,
    detail::{DetailState, DetailView},
    dto::{PostDetailResponse, PostListQuery, PostListResponse},
    errors::BoardError,
    models::{Post, PostDraft, PostPatch},
    pagination::paginate,
    search::search,
    tags::{extract_tags, filter_by_tag},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};

/// GET /posts?tag=rust&q=tokio&page=1&limit=10
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PostListQuery>,
) -> Result<Json<PostListResponse>, BoardError> {
    let posts = state.posts.list().await?;
    let tags = extract_tags(&posts);

    let tagged = filter_by_tag(&posts, params.tag());
    let found = if params.query().trim().is_empty() {
        tagged
    } else {
        let ids: Vec<String> = tagged.iter().map(|p| p.id.clone()).collect();
        let comments = state.comments.by_posts(ids).await?;
        search(&tagged, Some(&comments), params.query())
    };

    Ok(Json(PostListResponse {
        page: paginate(&found, params.pagination()),
        tags,
    }))
}

/// POST /posts
/// Headers: Authorization: Bearer <token>
/// Body: { "title": "...", "content": "...", "tags": ["..."] }
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PostDraft>,
) -> Result<(StatusCode, Json<Post>), BoardError> {
    let actor = state.actor(&headers)?;

    let id = state.posts.create(actor.as_ref(), payload).await?;
    let post = state.posts.get(&id).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostDetailResponse>, BoardError> {
    let mut view = DetailView::new(id.clone());

    match view.load(&state.posts, &state.comments).await? {
        DetailState::Loaded { post, comments } => Ok(Json(PostDetailResponse {
            post: post.clone(),
            comments: comments.clone(),
        })),
        DetailState::NotFound => Err(BoardError::NotFound(format!("post {}", id))),
        DetailState::FetchFailed(msg) => Err(BoardError::FetchFailed(msg.clone())),
        other => Err(BoardError::Internal(format!(
            "detail view stopped in {:?}",
            other
        ))),
    }
}

/// PATCH /posts/{id}
/// Headers: Authorization: Bearer <token>
/// Body: any of { "title", "content", "tags" }
pub async fn update_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<PostPatch>,
) -> Result<Json<Post>, BoardError> {
    let actor = state.actor(&headers)?;

    let post = state.posts.update(actor.as_ref(), &id, patch).await?;

    Ok(Json(post))
}

/// DELETE /posts/{id}
/// Headers: Authorization: Bearer <token>
pub async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, BoardError> {
    let actor = state.actor(&headers)?;

    state.posts.delete(actor.as_ref(), &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
