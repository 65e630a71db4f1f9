use crate::{
    auth::{IdentityProvider, actor_from_headers},
    config::Config,
    errors::Result,
    models::User,
    repository::{CommentRepository, PostRepository},
    store::RemoteStore,
};
use axum::http::HeaderMap;
use std::sync::Arc;

// ============================================================================
// APPLICATION STATE - Shared across all requests
// ============================================================================
/// Repositories hold `Arc` handles into the store, so cloning the state per
/// request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostRepository,
    pub comments: CommentRepository,
    pub identity: Arc<dyn IdentityProvider>,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AppState {
    pub fn new(config: &Config, store: &dyn RemoteStore, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            posts: PostRepository::new(store, &config.posts_collection),
            comments: CommentRepository::new(
                store,
                &config.comments_collection,
                &config.posts_collection,
            ),
            identity,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_hours: config.token_ttl_hours,
        }
    }

    /// The acting user of a request; `None` when no token was sent.
    pub fn actor(&self, headers: &HeaderMap) -> Result<Option<User>> {
        actor_from_headers(headers, &self.jwt_secret)
    }
}
