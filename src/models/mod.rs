//! Strict board types and their mapping to schema-less store documents.
//!
//! Stored records are untrusted: every field a reader relies on is
//! defaulted here, once, rather than at each read site.

mod comment;
mod post;
mod user;

pub use comment::{Comment, CommentDraft};
pub use post::{Post, PostDraft, PostPatch};
pub use user::User;

pub(crate) use comment::CommentRecord;
pub(crate) use post::{PostChanges, PostRecord};

use crate::errors::{BoardError, Result};
use crate::store::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::borrow::Cow;
use validator::ValidationError;

/// Author id recorded for legacy documents that never stored one.
pub const UNKNOWN_AUTHOR: &str = "unknown";

pub(crate) fn to_document<T: Serialize>(record: &T) -> Result<Document> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(BoardError::Internal(format!(
            "record serialized to non-object: {}",
            other
        ))),
        Err(e) => Err(BoardError::Internal(format!("record serialization failed: {}", e))),
    }
}

pub(crate) fn from_document<T: DeserializeOwned>(
    id: &str,
    doc: Document,
) -> std::result::Result<T, crate::store::StoreError> {
    serde_json::from_value(Value::Object(doc)).map_err(|e| crate::store::StoreError::Malformed {
        id: id.to_string(),
        reason: e.to_string(),
    })
}

/// Reads a timestamp stored either as RFC 3339 text or epoch millis.
/// Anything else counts as absent.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        Value::String(text) => DateTime::parse_from_rfc3339(&text)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }))
}

/// Reads a text field. Numbers and booleans keep their text form, anything
/// else reads as empty.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(scalar_text).unwrap_or_default())
}

pub(crate) fn lenient_opt_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(scalar_text))
}

/// Reads a tag list. Non-text entries are dropped; a non-array is absent.
pub(crate) fn lenient_tags<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(tag) => Some(tag),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn non_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::from("must not be blank"));
        return Err(err);
    }
    Ok(())
}
