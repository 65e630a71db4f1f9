use crate::models::{Comment, Post, User};
use crate::pagination::Page;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Paginated post list plus every tag on the board
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    #[serde(flatten)]
    pub page: Page<Post>,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: Post,
    pub comments: Vec<Comment>,
}
