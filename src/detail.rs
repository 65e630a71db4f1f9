//! State machine behind the single-post view.
//!
//! ```text
//! Loading ──► Loaded ──► Deleting ──► Deleted
//!    │          ▲            │
//!    │          └────────────┘ (delete failed, last_error set)
//!    ├──► NotFound
//!    └──► FetchFailed
//! ```

use crate::errors::{BoardError, Result};
use crate::models::{Comment, Post, User};
use crate::repository::{CommentRepository, PostRepository};
use std::mem;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded { post: Post, comments: Vec<Comment> },
    NotFound,
    FetchFailed(String),
    Deleting { post: Post, comments: Vec<Comment> },
    Deleted,
}

#[derive(Debug)]
pub struct DetailView {
    post_id: String,
    state: DetailState,
    last_error: Option<String>,
}

impl DetailView {
    pub fn new(post_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            state: DetailState::Loading,
            last_error: None,
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Message of the last failed delete, cleared by the next load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetches the post and its comments. Only valid while `Loading`.
    pub async fn load(
        &mut self,
        posts: &PostRepository,
        comments: &CommentRepository,
    ) -> Result<&DetailState> {
        if self.state != DetailState::Loading {
            return Err(BoardError::validation("detail view is not loading"));
        }

        self.last_error = None;
        self.state = match fetch(&self.post_id, posts, comments).await {
            Ok((post, comments)) => DetailState::Loaded { post, comments },
            Err(BoardError::NotFound(_)) => DetailState::NotFound,
            Err(e) => DetailState::FetchFailed(e.to_string()),
        };
        debug!("Detail view for {} is now {:?}", self.post_id, self.state);

        Ok(&self.state)
    }

    /// Returns to `Loading` so the view can be fetched again. A delete in
    /// flight or already completed cannot be reloaded.
    pub fn reload(&mut self) -> Result<()> {
        match self.state {
            DetailState::Deleting { .. } | DetailState::Deleted => {
                Err(BoardError::validation("post is being deleted"))
            }
            _ => {
                self.state = DetailState::Loading;
                Ok(())
            }
        }
    }

    /// Deletes the loaded post as `actor`. On failure the view returns to
    /// `Loaded` and keeps the error message.
    pub async fn delete(&mut self, actor: Option<&User>, posts: &PostRepository) -> Result<()> {
        let (post, comments) = match mem::replace(&mut self.state, DetailState::Loading) {
            DetailState::Loaded { post, comments } => (post, comments),
            other => {
                self.state = other;
                return Err(BoardError::validation("post is not loaded"));
            }
        };

        self.state = DetailState::Deleting {
            post: post.clone(),
            comments: comments.clone(),
        };

        match posts.delete(actor, &self.post_id).await {
            Ok(()) => {
                self.state = DetailState::Deleted;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.state = DetailState::Loaded { post, comments };
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

async fn fetch(
    post_id: &str,
    posts: &PostRepository,
    comments: &CommentRepository,
) -> Result<(Post, Vec<Comment>)> {
    let post = posts.get(post_id).await?;
    let comments = comments.list_by_post(post_id).await?;
    Ok((post, comments))
}
