//! Image store: the remote blob store receiving product images
//!
//! Objects are written once under a unique key and later served by the
//! CDN from `{public_base_url}/{key}`; this service never reads them back.

mod memory;
mod s3;

pub use memory::{MemoryImageStore, StoredObject};
pub use s3::S3ImageStore;

use async_trait::async_trait;
use axum::body::Bytes;

use crate::BoxError;

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `body` under `key` with the given MIME type
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), BoxError>;
}
