use crate::{
    errors::{BoardError, Result},
    guard,
    models::{Post, PostChanges, PostDraft, PostPatch, PostRecord, User, to_document},
    store::{Collection, RemoteStore},
    tags::normalize_tags,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

#[derive(Clone)]
pub struct PostRepository {
    items: Arc<dyn Collection>,
}

impl PostRepository {
    pub fn new(store: &dyn RemoteStore, collection: &str) -> Self {
        Self {
            items: store.collection(collection),
        }
    }

    /// All posts, in store-natural order. Documents that cannot be read
    /// as a post are skipped.
    pub async fn list(&self) -> Result<Vec<Post>> {
        let rows = self.items.list().await.map_err(BoardError::fetch)?;
        debug!("Fetched {} posts", rows.len());

        Ok(rows
            .into_iter()
            .filter_map(|(id, doc)| match Post::from_document(&id, doc) {
                Ok(post) => Some(post),
                Err(e) => {
                    warn!("Skipping unreadable post: {}", e);
                    None
                }
            })
            .collect())
    }

    pub async fn get(&self, post_id: &str) -> Result<Post> {
        let doc = self
            .items
            .get(post_id)
            .await
            .map_err(BoardError::fetch)?
            .ok_or_else(|| BoardError::NotFound(format!("post {}", post_id)))?;

        Post::from_document(post_id, doc).map_err(BoardError::fetch)
    }

    /// Stores a new post owned by `actor` and returns its id.
    pub async fn create(&self, actor: Option<&User>, draft: PostDraft) -> Result<String> {
        let draft = draft.trimmed();
        draft.validate()?;
        let user = guard::require_actor(actor)?;

        let record = PostRecord {
            title: draft.title,
            content: draft.content,
            tags: Some(normalize_tags(&draft.tags)),
            author_id: Some(user.id.clone()),
            author_email: Some(user.email.clone()),
            created_at: Some(Utc::now()),
            updated_at: None,
        };

        let id = self
            .items
            .add(to_document(&record)?)
            .await
            .map_err(BoardError::write)?;

        info!("Post created: {} by user {}", id, user.id);

        Ok(id)
    }

    /// Applies `patch` to a post owned by `actor` and returns the result.
    pub async fn update(&self, actor: Option<&User>, post_id: &str, patch: PostPatch) -> Result<Post> {
        let user = guard::require_actor(actor)?;
        let post = self.get(post_id).await?;
        guard::check(Some(user), &post.author_id).into_result()?;

        let draft = patch.merge(&post).trimmed();
        draft.validate()?;

        let changes = PostChanges {
            title: draft.title,
            content: draft.content,
            tags: normalize_tags(&draft.tags),
            updated_at: Utc::now(),
        };

        self.items
            .update(post_id, to_document(&changes)?)
            .await
            .map_err(BoardError::write)?;

        info!("Post updated: {} by user {}", post_id, user.id);

        Ok(Post {
            title: changes.title,
            content: changes.content,
            tags: changes.tags,
            updated_at: Some(changes.updated_at),
            ..post
        })
    }

    /// Removes a post owned by `actor`. Its comments are left in place.
    pub async fn delete(&self, actor: Option<&User>, post_id: &str) -> Result<()> {
        let user = guard::require_actor(actor)?;
        let post = self.get(post_id).await?;
        guard::check(Some(user), &post.author_id).into_result()?;

        self.items
            .delete(post_id)
            .await
            .map_err(BoardError::write)?;

        info!("Post deleted: {} by user {}", post_id, user.id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn repo() -> PostRepository {
        PostRepository::new(&MemoryStore::new(), "items")
    }

    fn alice() -> User {
        User::new("alice", "alice@example.com")
    }

    #[tokio::test]
    async fn create_trims_and_stamps() {
        let posts = repo();
        let id = posts
            .create(Some(&alice()), PostDraft::new("  Hello ", " World\n").with_tags([" a", "a", "b "]))
            .await
            .unwrap();

        let post = posts.get(&id).await.unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");
        assert_eq!(post.tags, vec!["a", "b"]);
        assert_eq!(post.author_id, "alice");
        assert_eq!(post.author_email.as_deref(), Some("alice@example.com"));
        assert!(post.updated_at.is_none());
    }

    #[tokio::test]
    async fn create_rejects_blank_before_auth() {
        let posts = repo();
        let blank = posts.create(None, PostDraft::new(" ", "c")).await;
        assert!(matches!(blank, Err(BoardError::Validation(_))));

        let anonymous = posts.create(None, PostDraft::new("t", "c")).await;
        assert!(matches!(anonymous, Err(BoardError::AuthRequired)));
        assert!(posts.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn padded_input_is_measured_after_trimming() {
        let posts = repo();
        let title = "x".repeat(200);
        let id = posts
            .create(Some(&alice()), PostDraft::new(format!("  {}\n", title), " C "))
            .await
            .unwrap();
        assert_eq!(posts.get(&id).await.unwrap().title, title);

        let updated = posts
            .update(Some(&alice()), &id, PostPatch::title(format!("\t{} ", title)))
            .await
            .unwrap();
        assert_eq!(updated.title, title);
    }

    #[tokio::test]
    async fn list_survives_legacy_records() {
        let store = MemoryStore::new();
        let posts = PostRepository::new(&store, "items");
        let raw = store.collection("items");

        posts.create(Some(&alice()), PostDraft::new("good", "c")).await.unwrap();
        raw.add(
            json!({"title": "legacy", "content": "c", "tags": "rust"})
                .as_object()
                .cloned()
                .unwrap(),
        )
        .await
        .unwrap();

        let listed = posts.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "good");
        assert_eq!(listed[1].title, "legacy");
        assert!(listed[1].tags.is_empty());
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        assert!(matches!(repo().get("nope").await, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_merges_patch() {
        let posts = repo();
        let id = posts
            .create(Some(&alice()), PostDraft::new("T", "C").with_tags(["x"]))
            .await
            .unwrap();

        let updated = posts
            .update(
                Some(&alice()),
                &id,
                PostPatch {
                    tags: Some(vec!["y".into(), "y".into(), "x".into()]),
                    ..PostPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "T");
        assert_eq!(updated.tags, vec!["y", "x"]);
        assert_eq!(posts.get(&id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_rejects_blanking_a_field() {
        let posts = repo();
        let id = posts.create(Some(&alice()), PostDraft::new("T", "C")).await.unwrap();

        let result = posts.update(Some(&alice()), &id, PostPatch::title("  ")).await;
        assert!(matches!(result, Err(BoardError::Validation(_))));
        assert_eq!(posts.get(&id).await.unwrap().title, "T");
    }

    #[tokio::test]
    async fn update_and_delete_missing_post() {
        let posts = repo();
        let update = posts.update(Some(&alice()), "nope", PostPatch::title("x")).await;
        assert!(matches!(update, Err(BoardError::NotFound(_))));

        let delete = posts.delete(Some(&alice()), "nope").await;
        assert!(matches!(delete, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn anonymous_cannot_mutate() {
        let posts = repo();
        let id = posts.create(Some(&alice()), PostDraft::new("T", "C")).await.unwrap();

        let update = posts.update(None, &id, PostPatch::title("x")).await;
        assert!(matches!(update, Err(BoardError::AuthRequired)));
        let delete = posts.delete(None, &id).await;
        assert!(matches!(delete, Err(BoardError::AuthRequired)));
        assert_eq!(posts.list().await.unwrap().len(), 1);
    }
}
