use super::{
    UNKNOWN_AUTHOR, from_document, lenient_opt_string, lenient_string, lenient_timestamp,
    non_blank,
};
use crate::store::{Document, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub author_id: String,
    /// Display-only copy of the author's email.
    pub author_email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub(crate) fn from_document(id: &str, doc: Document) -> StoreResult<Self> {
        let record: CommentRecord = from_document(id, doc)?;
        Ok(Comment {
            id: id.to_string(),
            post_id: record.post_id,
            content: record.content,
            author_id: record
                .author_id
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            author_email: record.author_email,
            created_at: record.created_at,
        })
    }
}

#[derive(Debug, Clone, Validate, Deserialize)]
pub struct CommentDraft {
    #[validate(custom(function = "non_blank"), length(max = 1000))]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentRecord {
    pub post_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(default, alias = "userId", deserialize_with = "lenient_opt_string")]
    pub author_id: Option<String>,
    #[serde(default, alias = "author", deserialize_with = "lenient_opt_string")]
    pub author_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}
