use super::{
    UNKNOWN_AUTHOR, from_document, lenient_opt_string, lenient_string, lenient_tags,
    lenient_timestamp, non_blank,
};
use crate::store::{Document, StoreResult};
use crate::tags::normalize_tags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author_id: String,
    pub author_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    pub(crate) fn from_document(id: &str, doc: Document) -> StoreResult<Self> {
        let record: PostRecord = from_document(id, doc)?;
        Ok(record.into_post(id))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Input for a new post.
#[derive(Debug, Clone, Default, Validate, Deserialize)]
pub struct PostDraft {
    #[validate(custom(function = "non_blank"), length(max = 200))]
    pub title: String,
    #[validate(custom(function = "non_blank"), length(max = 5000))]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Title and content without surrounding whitespace, as they are stored.
    pub(crate) fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            tags: self.tags,
        }
    }
}

/// Partial edit of a post; `None` keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Applies the patch over `post`, producing the draft to validate.
    pub(crate) fn merge(self, post: &Post) -> PostDraft {
        PostDraft {
            title: self.title.unwrap_or_else(|| post.title.clone()),
            content: self.content.unwrap_or_else(|| post.content.clone()),
            tags: self.tags.unwrap_or_else(|| post.tags.clone()),
        }
    }
}

/// Post as persisted in the store.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PostRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Option<Vec<String>>,
    #[serde(alias = "userId", deserialize_with = "lenient_opt_string")]
    pub author_id: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub author_email: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PostRecord {
    fn into_post(self, id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: self.title,
            content: self.content,
            tags: normalize_tags(self.tags.unwrap_or_default()),
            author_id: self
                .author_id
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            author_email: self.author_email,
            created_at: self.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            updated_at: self.updated_at,
        }
    }
}

/// Fields written by an edit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostChanges {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn sparse_record_gets_defaults() {
        let post = Post::from_document("p1", doc(json!({"title": "t", "content": "c"}))).unwrap();
        assert_eq!(post.id, "p1");
        assert!(post.tags.is_empty());
        assert_eq!(post.author_id, UNKNOWN_AUTHOR);
        assert_eq!(post.created_at, DateTime::<Utc>::UNIX_EPOCH);
        assert!(post.updated_at.is_none());
    }

    #[test]
    fn legacy_user_id_and_null_tags() {
        let post = Post::from_document(
            "p1",
            doc(json!({"title": "t", "content": "c", "userId": "u9", "tags": null})),
        )
        .unwrap();
        assert_eq!(post.author_id, "u9");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn stored_duplicates_are_collapsed() {
        let post = Post::from_document(
            "p1",
            doc(json!({"title": "t", "content": "c", "tags": ["a", "b", "a"]})),
        )
        .unwrap();
        assert_eq!(post.tags, vec!["a", "b"]);
    }

    #[test]
    fn loosely_typed_fields_are_defaulted() {
        let post = Post::from_document(
            "p1",
            doc(json!({"title": 7, "content": ["x"], "tags": "rust", "authorId": 42})),
        )
        .unwrap();
        assert_eq!(post.title, "7");
        assert_eq!(post.content, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.author_id, "42");
    }

    #[test]
    fn draft_validation() {
        assert!(PostDraft::new("t", "c").validate().is_ok());
        assert!(PostDraft::new("   ", "c").validate().is_err());
        assert!(PostDraft::new("t", "").validate().is_err());
        assert!(PostDraft::new("x".repeat(201), "c").validate().is_err());
    }

    #[test]
    fn limits_apply_after_trimming() {
        let padded = PostDraft::new(format!("  {}  ", "x".repeat(200)), "\n c \n");
        assert!(padded.clone().validate().is_err());

        let trimmed = padded.trimmed();
        assert!(trimmed.validate().is_ok());
        assert_eq!(trimmed.title.len(), 200);
        assert_eq!(trimmed.content, "c");
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let post = Post {
            id: "p1".into(),
            title: "old".into(),
            content: "body".into(),
            tags: vec!["x".into()],
            author_id: "u1".into(),
            author_email: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        let draft = PostPatch::title("new").merge(&post);
        assert_eq!(draft.title, "new");
        assert_eq!(draft.content, "body");
        assert_eq!(draft.tags, vec!["x"]);
    }
}
