//! In-process product table for local development and tests

use async_trait::async_trait;
use shared::Product;
use tokio::sync::RwLock;

use super::ProductTable;
use crate::BoxError;

/// Keeps records in insertion order; an upsert replaces in place.
#[derive(Default)]
pub struct MemoryProductTable {
    items: RwLock<Vec<Product>>,
}

impl MemoryProductTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            items: RwLock::new(products.into_iter().collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ProductTable for MemoryProductTable {
    async fn scan(&self) -> Result<Vec<Product>, BoxError> {
        Ok(self.items.read().await.clone())
    }

    async fn put(&self, product: &Product) -> Result<(), BoxError> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|p| p.code == product.code) {
            Some(existing) => *existing = product.clone(),
            None => items.push(product.clone()),
        }
        Ok(())
    }

    async fn delete(&self, code: i64) -> Result<(), BoxError> {
        self.items.write().await.retain(|p| p.code != code);
        Ok(())
    }
}
