//! Product table: the remote key-value store holding catalog records
//!
//! Records are addressed by a single numeric key, `ma_sp`. The store is
//! the source of truth; nothing here caches.

mod dynamo;
mod memory;

pub use dynamo::DynamoProductTable;
pub use memory::MemoryProductTable;

use async_trait::async_trait;
use shared::Product;

use crate::BoxError;

#[async_trait]
pub trait ProductTable: Send + Sync {
    /// Read every record, in the order the store returns them
    async fn scan(&self) -> Result<Vec<Product>, BoxError>;

    /// Insert or replace the record keyed by `product.code`
    async fn put(&self, product: &Product) -> Result<(), BoxError>;

    /// Delete the record keyed by `code` (absent keys are not an error)
    async fn delete(&self, code: i64) -> Result<(), BoxError>;
}
