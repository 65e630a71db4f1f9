use super::{Collection, Document, RemoteStore, StoreError, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use uuid::Uuid;

/// In-process document store.
///
/// `DashMap` gives lock-free reads and per-shard writes, so independent
/// sessions can hit the same collection without an outer mutex.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<String, Arc<MemoryCollection>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RemoteStore for MemoryStore {
    fn collection(&self, name: &str) -> Arc<dyn Collection> {
        let handle = self
            .collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryCollection::default()));
        Arc::clone(&handle) as Arc<dyn Collection>
    }
}

struct Entry {
    // insertion sequence, defines store-natural order
    seq: u64,
    doc: Document,
}

#[derive(Default)]
pub struct MemoryCollection {
    docs: DashMap<String, Entry>,
    next_seq: AtomicU64,
}

impl MemoryCollection {
    fn snapshot<F>(&self, mut keep: F) -> Vec<(String, Document)>
    where
        F: FnMut(&Document) -> bool,
    {
        let mut rows: Vec<(u64, String, Document)> = self
            .docs
            .iter()
            .filter(|entry| keep(&entry.value().doc))
            .map(|entry| (entry.value().seq, entry.key().clone(), entry.value().doc.clone()))
            .collect();

        rows.sort_by_key(|(seq, _, _)| *seq);
        rows.into_iter().map(|(_, id, doc)| (id, doc)).collect()
    }
}

#[async_trait]
impl Collection for MemoryCollection {
    async fn add(&self, doc: Document) -> StoreResult<String> {
        let id = Uuid::new_v4().simple().to_string();
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.docs.insert(id.clone(), Entry { seq, doc });
        Ok(id)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Document>> {
        Ok(self.docs.get(id).map(|entry| entry.doc.clone()))
    }

    async fn list(&self) -> StoreResult<Vec<(String, Document)>> {
        Ok(self.snapshot(|_| true))
    }

    async fn query(&self, field: &str, value: &Value) -> StoreResult<Vec<(String, Document)>> {
        Ok(self.snapshot(|doc| doc.get(field) == Some(value)))
    }

    async fn update(&self, id: &str, partial: Document) -> StoreResult<()> {
        let mut entry = self
            .docs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        for (key, value) in partial {
            entry.doc.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.docs.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryStore::new();
        let items = store.collection("items");

        let a = items.add(doc(json!({"n": 1}))).await.unwrap();
        let b = items.add(doc(json!({"n": 2}))).await.unwrap();
        let c = items.add(doc(json!({"n": 3}))).await.unwrap();

        let ids: Vec<String> = items.list().await.unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[tokio::test]
    async fn same_name_shares_collection() {
        let store = MemoryStore::new();
        let id = store.collection("items").add(doc(json!({}))).await.unwrap();
        assert!(store.collection("items").get(&id).await.unwrap().is_some());
        assert!(store.collection("other").get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn query_matches_exact_field() {
        let store = MemoryStore::new();
        let comments = store.collection("comments");
        comments.add(doc(json!({"postId": "p1"}))).await.unwrap();
        comments.add(doc(json!({"postId": "p2"}))).await.unwrap();
        comments.add(doc(json!({"postId": "p1"}))).await.unwrap();

        let hits = comments.query("postId", &json!("p1")).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn update_merges_and_rejects_missing() {
        let store = MemoryStore::new();
        let items = store.collection("items");
        let id = items.add(doc(json!({"title": "a", "body": "b"}))).await.unwrap();

        items.update(&id, doc(json!({"title": "z"}))).await.unwrap();
        let stored = items.get(&id).await.unwrap().unwrap();
        assert_eq!(stored["title"], "z");
        assert_eq!(stored["body"], "b");

        let missing = items.update("nope", doc(json!({}))).await;
        assert!(matches!(missing, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_document() {
        let store = MemoryStore::new();
        let items = store.collection("items");
        let id = items.add(doc(json!({}))).await.unwrap();
        items.delete(&id).await.unwrap();
        assert!(items.get(&id).await.unwrap().is_none());
    }
}
