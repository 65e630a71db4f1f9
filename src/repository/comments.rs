use crate::{
    errors::{BoardError, Result},
    guard,
    models::{Comment, CommentDraft, CommentRecord, User, to_document},
    search::CommentsByPost,
    store::{Collection, RemoteStore},
};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

const POST_ID_FIELD: &str = "postId";

#[derive(Clone)]
pub struct CommentRepository {
    comments: Arc<dyn Collection>,
    posts: Arc<dyn Collection>,
}

impl CommentRepository {
    pub fn new(store: &dyn RemoteStore, comments: &str, posts: &str) -> Self {
        Self {
            comments: store.collection(comments),
            posts: store.collection(posts),
        }
    }

    /// Comments on `post_id`, newest first. Comments without a timestamp
    /// follow in store-natural order.
    pub async fn list_by_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        let rows = self
            .comments
            .query(POST_ID_FIELD, &Value::String(post_id.to_string()))
            .await
            .map_err(BoardError::fetch)?;
        debug!("Fetched {} comments for post {}", rows.len(), post_id);

        let mut comments: Vec<Comment> = rows
            .into_iter()
            .filter_map(|(id, doc)| match Comment::from_document(&id, doc) {
                Ok(comment) => Some(comment),
                Err(e) => {
                    warn!("Skipping unreadable comment: {}", e);
                    None
                }
            })
            .collect();

        // stable: None sorts below Some, so undated comments keep their order at the end
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    /// Comments for each of `post_ids`, keyed by post id.
    pub async fn by_posts<I, S>(&self, post_ids: I) -> Result<CommentsByPost>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_post = CommentsByPost::new();
        for post_id in post_ids {
            let post_id = post_id.as_ref();
            let comments = self.list_by_post(post_id).await?;
            by_post.insert(post_id.to_string(), comments);
        }
        Ok(by_post)
    }

    pub async fn get(&self, comment_id: &str) -> Result<Comment> {
        let doc = self
            .comments
            .get(comment_id)
            .await
            .map_err(BoardError::fetch)?
            .ok_or_else(|| BoardError::NotFound(format!("comment {}", comment_id)))?;

        Comment::from_document(comment_id, doc).map_err(BoardError::fetch)
    }

    /// Adds a comment by `actor` to an existing post and returns its id.
    pub async fn create(&self, actor: Option<&User>, post_id: &str, content: &str) -> Result<String> {
        let user = guard::require_actor(actor)?;
        let draft = CommentDraft {
            content: content.trim().to_string(),
        };
        draft.validate()?;

        let post_exists = self
            .posts
            .get(post_id)
            .await
            .map_err(BoardError::fetch)?
            .is_some();
        if !post_exists {
            return Err(BoardError::NotFound(format!("post {}", post_id)));
        }

        let record = CommentRecord {
            post_id: post_id.to_string(),
            content: draft.content,
            author_id: Some(user.id.clone()),
            author_email: Some(user.email.clone()),
            created_at: Some(Utc::now()),
        };

        let id = self
            .comments
            .add(to_document(&record)?)
            .await
            .map_err(BoardError::write)?;

        info!("Comment created: {} on post {} by user {}", id, post_id, user.id);

        Ok(id)
    }

    /// Removes a comment. `actor` must be `comment_author_id`, and the stored
    /// comment must agree on who wrote it.
    pub async fn delete(
        &self,
        actor: Option<&User>,
        comment_id: &str,
        comment_author_id: &str,
    ) -> Result<()> {
        guard::check(actor, comment_author_id).into_result()?;

        let comment = self.get(comment_id).await?;
        if comment.author_id != comment_author_id {
            warn!(
                "Comment {} is owned by {}, not {}",
                comment_id, comment.author_id, comment_author_id
            );
            return Err(BoardError::Forbidden);
        }

        self.comments
            .delete(comment_id)
            .await
            .map_err(BoardError::write)?;

        info!("Comment deleted: {} by user {}", comment_id, comment_author_id);

        Ok(())
    }
}
