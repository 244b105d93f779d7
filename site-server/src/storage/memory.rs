//! In-memory object store

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;

use super::{ObjectStore, StoredObject};
use crate::BoxError;

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<String, (Bytes, String)>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), BoxError> {
        self.objects
            .write()
            .insert(key.to_string(), (body, content_type.to_string()));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, BoxError> {
        Ok(self
            .objects
            .read()
            .get(key)
            .map(|(body, content_type)| StoredObject {
                etag: crate::util::content_etag(body),
                body: body.clone(),
                content_type: Some(content_type.clone()),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryObjectStore::new();
        assert!(store.get("a.jpg").await.unwrap().is_none());

        store
            .put("a.jpg", Bytes::from_static(b"jpeg"), "image/jpeg")
            .await
            .unwrap();
        let obj = store.get("a.jpg").await.unwrap().unwrap();
        assert_eq!(obj.body, Bytes::from_static(b"jpeg"));
        assert_eq!(obj.content_type.as_deref(), Some("image/jpeg"));
        assert!(obj.etag.starts_with('"'));
        assert_eq!(store.keys(), vec!["a.jpg"]);
    }
}
