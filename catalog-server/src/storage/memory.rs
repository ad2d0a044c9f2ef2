//! In-process image store for local development and tests

use std::collections::HashMap;

use async_trait::async_trait;
use axum::body::Bytes;
use tokio::sync::RwLock;

use super::ImageStore;
use crate::BoxError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
}

#[derive(Default)]
pub struct MemoryImageStore {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), BoxError> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
