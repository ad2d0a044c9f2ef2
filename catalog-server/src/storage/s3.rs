//! S3-backed image store

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use axum::body::Bytes;

use super::ImageStore;
use crate::BoxError;

pub struct S3ImageStore {
    client: Client,
    bucket: String,
}

impl S3ImageStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), BoxError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await?;

        tracing::debug!(bucket = %self.bucket, key = %key, size, "Object stored in S3");
        Ok(())
    }
}
