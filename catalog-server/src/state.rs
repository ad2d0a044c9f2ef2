//! Application state for catalog-server

use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_s3::Client as S3Client;

use crate::BoxError;
use crate::catalog::{CatalogService, ImagePolicy, ImageUploader};
use crate::config::{Backend, Config};
use crate::storage::{ImageStore, MemoryImageStore, S3ImageStore};
use crate::table::{DynamoProductTable, MemoryProductTable, ProductTable};

/// Shared application state
///
/// Remote clients are built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    /// Set with the memory backend so uploaded images can be served locally
    pub local_images: Option<Arc<MemoryImageStore>>,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog,
            local_images: None,
        }
    }

    /// Create AppState from configuration
    pub async fn from_config(config: &Config) -> Result<Self, BoxError> {
        match config.backend {
            Backend::Aws => {
                let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                    .region(aws_config::Region::new(config.aws_region.clone()))
                    .load()
                    .await;

                let table: Arc<dyn ProductTable> = Arc::new(DynamoProductTable::new(
                    DynamoClient::new(&aws_config),
                    &config.table_name,
                ));

                let images = config.images.as_ref().map(|images| {
                    let store: Arc<dyn ImageStore> = Arc::new(S3ImageStore::new(
                        S3Client::new(&aws_config),
                        &images.bucket,
                    ));
                    ImageUploader::new(
                        store,
                        ImagePolicy::new(images.max_bytes, &images.public_base_url),
                    )
                });

                tracing::info!(
                    table = %config.table_name,
                    region = %config.aws_region,
                    bucket = config.images.as_ref().map(|i| i.bucket.as_str()).unwrap_or("-"),
                    "AWS clients ready"
                );

                Ok(Self::new(CatalogService::new(table, images)))
            }
            Backend::Memory => {
                let store = Arc::new(MemoryImageStore::new());
                let images = config.images.as_ref().map(|images| {
                    ImageUploader::new(
                        store.clone(),
                        ImagePolicy::new(images.max_bytes, &images.public_base_url),
                    )
                });

                tracing::warn!("Using in-memory catalog backend, data is lost on restart");

                Ok(Self {
                    catalog: CatalogService::new(Arc::new(MemoryProductTable::new()), images),
                    local_images: config.images.as_ref().map(|_| store),
                })
            }
        }
    }
}
