//! Document store interface.
//!
//! The board treats its backing store as an opaque service holding
//! schema-less records in named collections. Repositories are the only
//! writers; everything else reads through them.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// A schema-less record as held by the store.
pub type Document = Map<String, Value>;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {0} not found")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed document {id}: {reason}")]
    Malformed { id: String, reason: String },
}

/// Collection-scoped CRUD and query primitives.
///
/// `list` and `query` return documents in store-natural order. Writes are
/// last-write-wins per document.
#[async_trait]
pub trait Collection: Send + Sync {
    /// Stores a new document and returns its assigned id.
    async fn add(&self, doc: Document) -> StoreResult<String>;

    async fn get(&self, id: &str) -> StoreResult<Option<Document>>;

    async fn list(&self) -> StoreResult<Vec<(String, Document)>>;

    /// Documents whose `field` equals `value`.
    async fn query(&self, field: &str, value: &Value) -> StoreResult<Vec<(String, Document)>>;

    /// Merges `partial` into an existing document.
    ///
    /// Returns `Err(StoreError::NotFound)` if the document doesn't exist.
    async fn update(&self, id: &str, partial: Document) -> StoreResult<()>;

    async fn delete(&self, id: &str) -> StoreResult<()>;
}

pub trait RemoteStore: Send + Sync {
    fn collection(&self, name: &str) -> Arc<dyn Collection>;
}
