//! Catalog service: list, create and bulk-delete products
//!
//! Every read is a full scan of the product table and every write goes
//! straight to it. When image upload is enabled, creating a product first
//! stores its image in the image store and records the public URL.

mod input;
mod upload;

pub use input::{
    FIELD_CODE, FIELD_IMAGE, FIELD_NAME, FIELD_QUANTITY, ImageUpload, NewProduct, parse_integer,
};
pub use upload::{ALLOWED_IMAGE_TYPES, ImagePolicy, UPLOAD_PREFIX};

use std::sync::Arc;

use shared::Product;

use crate::error::{CatalogError, CatalogResult, InvalidInput};
use crate::storage::ImageStore;
use crate::table::ProductTable;

/// Image store plus the rules uploads must satisfy
#[derive(Clone)]
pub struct ImageUploader {
    store: Arc<dyn ImageStore>,
    policy: ImagePolicy,
}

impl ImageUploader {
    pub fn new(store: Arc<dyn ImageStore>, policy: ImagePolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &ImagePolicy {
        &self.policy
    }

    /// Validate and store the image, returning its public URL
    async fn upload(&self, image: ImageUpload) -> CatalogResult<String> {
        self.policy.validate(&image)?;

        let key = self.policy.object_key(&image.filename);
        let size = image.data.len();
        self.store
            .put_object(&key, image.data, &image.content_type)
            .await
            .map_err(CatalogError::Upload)?;

        tracing::info!(key = %key, size, "Product image uploaded");
        Ok(self.policy.public_url(&key))
    }
}

#[derive(Clone)]
pub struct CatalogService {
    table: Arc<dyn ProductTable>,
    /// `None` when products carry no image
    images: Option<ImageUploader>,
}

impl CatalogService {
    pub fn new(table: Arc<dyn ProductTable>, images: Option<ImageUploader>) -> Self {
        Self { table, images }
    }

    pub fn image_upload_enabled(&self) -> bool {
        self.images.is_some()
    }

    pub fn max_image_bytes(&self) -> Option<usize> {
        self.images.as_ref().map(|u| u.policy().max_bytes())
    }

    /// All products in store order
    pub async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        self.table.scan().await.map_err(CatalogError::RemoteStore)
    }

    /// Create or replace the product keyed by the submitted code.
    ///
    /// All input is checked before any remote call. With image upload
    /// enabled the image is stored first; if the record write then fails the
    /// object stays in the bucket and the whole operation fails.
    pub async fn create_product(&self, form: NewProduct) -> CatalogResult<Product> {
        let code = input::required(FIELD_CODE, form.code.as_deref())?;
        let code = parse_integer(FIELD_CODE, code)?;
        let name = input::required(FIELD_NAME, form.name.as_deref())?.to_string();
        let quantity = input::required(FIELD_QUANTITY, form.quantity.as_deref())?;
        let quantity = parse_integer(FIELD_QUANTITY, quantity)?;

        let mut product = Product::new(code, name, quantity);

        if let Some(uploader) = &self.images {
            let image = form.image.ok_or(InvalidInput::MissingImage)?;
            let url = uploader.upload(image).await?;
            product.image_url = Some(url);
        }

        if let Err(e) = self.table.put(&product).await {
            if let Some(url) = &product.image_url {
                tracing::warn!(
                    code,
                    image_url = %url,
                    "Product record not written, uploaded image is orphaned"
                );
            }
            return Err(CatalogError::RemoteStore(e));
        }

        tracing::info!(code, "Product saved");
        Ok(product)
    }

    /// Delete products one at a time, last submitted first.
    ///
    /// Every code is parsed before the first delete. The first failed delete
    /// stops the batch; products deleted before it stay deleted.
    pub async fn delete_products(&self, codes: Vec<String>) -> CatalogResult<()> {
        if codes.is_empty() {
            return Ok(());
        }

        let codes = codes
            .iter()
            .map(|raw| parse_integer(FIELD_CODE, raw))
            .collect::<Result<Vec<_>, _>>()?;

        for (done, code) in codes.iter().rev().enumerate() {
            if let Err(e) = self.table.delete(*code).await {
                tracing::warn!(
                    code,
                    deleted = done,
                    remaining = codes.len() - done,
                    "Bulk delete aborted"
                );
                return Err(CatalogError::RemoteStore(e));
            }
            tracing::debug!(code, "Product deleted");
        }

        tracing::info!(count = codes.len(), "Products deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoxError;
    use crate::storage::MemoryImageStore;
    use crate::table::MemoryProductTable;
    use async_trait::async_trait;
    use axum::body::Bytes;
    use tokio::sync::Mutex;

    /// Records deletes and fails on a chosen code
    #[derive(Default)]
    struct RecordingTable {
        deleted: Mutex<Vec<i64>>,
        fail_delete_on: Option<i64>,
        fail_put: bool,
    }

    #[async_trait]
    impl ProductTable for RecordingTable {
        async fn scan(&self) -> Result<Vec<Product>, BoxError> {
            Err("scan unavailable".into())
        }

        async fn put(&self, _product: &Product) -> Result<(), BoxError> {
            if self.fail_put {
                return Err("put rejected".into());
            }
            Ok(())
        }

        async fn delete(&self, code: i64) -> Result<(), BoxError> {
            if self.fail_delete_on == Some(code) {
                return Err("delete rejected".into());
            }
            self.deleted.lock().await.push(code);
            Ok(())
        }
    }

    struct FailingImageStore;

    #[async_trait]
    impl ImageStore for FailingImageStore {
        async fn put_object(&self, _: &str, _: Bytes, _: &str) -> Result<(), BoxError> {
            Err("bucket unreachable".into())
        }
    }

    fn new_product(code: &str, name: &str, quantity: &str) -> NewProduct {
        NewProduct {
            code: Some(code.to_string()),
            name: Some(name.to_string()),
            quantity: Some(quantity.to_string()),
            image: None,
        }
    }

    fn png(name: &str, size: usize) -> ImageUpload {
        ImageUpload {
            filename: name.to_string(),
            content_type: "image/png".to_string(),
            data: Bytes::from(vec![7u8; size]),
        }
    }

    fn uploader(store: Arc<dyn ImageStore>) -> ImageUploader {
        ImageUploader::new(store, ImagePolicy::new(2_000_000, "https://cdn.example.net"))
    }

    #[tokio::test]
    async fn test_create_then_list_roundtrip() {
        let table = Arc::new(MemoryProductTable::new());
        let service = CatalogService::new(table, None);

        service
            .create_product(new_product("5", "Pencil", "120"))
            .await
            .unwrap();

        let products = service.list_products().await.unwrap();
        assert_eq!(products, vec![Product::new(5, "Pencil", 120)]);
    }

    #[tokio::test]
    async fn test_duplicate_code_overwrites() {
        let table = Arc::new(MemoryProductTable::new());
        let service = CatalogService::new(table, None);

        service.create_product(new_product("5", "Pencil", "1")).await.unwrap();
        service.create_product(new_product("5", "Eraser", "2")).await.unwrap();

        let products = service.list_products().await.unwrap();
        assert_eq!(products, vec![Product::new(5, "Eraser", 2)]);
    }

    #[tokio::test]
    async fn test_non_numeric_code_is_rejected_before_write() {
        let table = Arc::new(MemoryProductTable::new());
        let service = CatalogService::new(table.clone(), None);

        let err = service
            .create_product(new_product("abc", "Pencil", "1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidInput(InvalidInput::NotAnInteger { field: "ma_sp", .. })
        ));
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected() {
        let service = CatalogService::new(Arc::new(MemoryProductTable::new()), None);
        let mut input = new_product("1", "Pencil", "1");
        input.quantity = None;

        let err = service.create_product(input).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidInput(InvalidInput::MissingField("so_luong"))
        ));
    }

    #[tokio::test]
    async fn test_create_with_image_stores_object_and_url() {
        let table = Arc::new(MemoryProductTable::new());
        let store = Arc::new(MemoryImageStore::new());
        let service = CatalogService::new(table, Some(uploader(store.clone())));

        let mut input = new_product("9", "Mug", "4");
        input.image = Some(png("mug.png", 2_000_000));
        let product = service.create_product(input).await.unwrap();

        let keys = store.keys().await;
        assert_eq!(keys.len(), 1);
        assert!(keys[0].starts_with("uploads/") && keys[0].ends_with("-mug.png"));
        assert_eq!(
            product.image_url.as_deref(),
            Some(format!("https://cdn.example.net/{}", keys[0]).as_str())
        );

        let stored = store.get(&keys[0]).await.unwrap();
        assert_eq!(stored.content_type, "image/png");
        assert_eq!(stored.body.len(), 2_000_000);

        assert_eq!(service.list_products().await.unwrap(), vec![product]);
    }

    #[tokio::test]
    async fn test_missing_image_is_rejected_when_upload_enabled() {
        let table = Arc::new(MemoryProductTable::new());
        let service = CatalogService::new(
            table.clone(),
            Some(uploader(Arc::new(MemoryImageStore::new()))),
        );

        let err = service
            .create_product(new_product("1", "Mug", "1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidInput(InvalidInput::MissingImage)
        ));
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn test_oversized_image_writes_nothing() {
        let table = Arc::new(MemoryProductTable::new());
        let store = Arc::new(MemoryImageStore::new());
        let service = CatalogService::new(table.clone(), Some(uploader(store.clone())));

        let mut input = new_product("1", "Mug", "1");
        input.image = Some(png("mug.png", 2_000_001));
        let err = service.create_product(input).await.unwrap_err();

        assert!(matches!(err, CatalogError::PayloadTooLarge { .. }));
        assert!(store.keys().await.is_empty());
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn test_upload_failure_skips_record() {
        let table = Arc::new(MemoryProductTable::new());
        let service = CatalogService::new(
            table.clone(),
            Some(uploader(Arc::new(FailingImageStore))),
        );

        let mut input = new_product("1", "Mug", "1");
        input.image = Some(png("mug.png", 10));
        let err = service.create_product(input).await.unwrap_err();

        assert!(matches!(err, CatalogError::Upload(_)));
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn test_put_failure_after_upload_fails_operation() {
        let table = Arc::new(RecordingTable {
            fail_put: true,
            ..Default::default()
        });
        let store = Arc::new(MemoryImageStore::new());
        let service = CatalogService::new(table, Some(uploader(store.clone())));

        let mut input = new_product("1", "Mug", "1");
        input.image = Some(png("mug.png", 10));
        let err = service.create_product(input).await.unwrap_err();

        assert!(matches!(err, CatalogError::RemoteStore(_)));
        assert_eq!(store.keys().await.len(), 1);
    }

    #[tokio::test]
    async fn test_image_ignored_when_upload_disabled() {
        let table = Arc::new(MemoryProductTable::new());
        let service = CatalogService::new(table, None);

        let mut input = new_product("2", "Cup", "3");
        input.image = Some(png("cup.png", 10));
        let product = service.create_product(input).await.unwrap();
        assert!(product.image_url.is_none());
    }

    #[tokio::test]
    async fn test_list_surfaces_scan_failure() {
        let service = CatalogService::new(Arc::new(RecordingTable::default()), None);
        let err = service.list_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::RemoteStore(_)));
    }

    #[tokio::test]
    async fn test_delete_empty_is_noop() {
        let table = Arc::new(RecordingTable::default());
        let service = CatalogService::new(table.clone(), None);

        service.delete_products(vec![]).await.unwrap();
        assert!(table.deleted.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_runs_in_reverse_submission_order() {
        let table = Arc::new(RecordingTable::default());
        let service = CatalogService::new(table.clone(), None);

        service
            .delete_products(vec!["5".into(), "7".into()])
            .await
            .unwrap();
        assert_eq!(*table.deleted.lock().await, vec![7, 5]);
    }

    #[tokio::test]
    async fn test_delete_stops_at_first_failure() {
        let table = Arc::new(RecordingTable {
            fail_delete_on: Some(2),
            ..Default::default()
        });
        let service = CatalogService::new(table.clone(), None);

        let err = service
            .delete_products(vec!["1".into(), "2".into(), "3".into()])
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::RemoteStore(_)));
        // 3 went first and stays deleted; 1 was never attempted
        assert_eq!(*table.deleted.lock().await, vec![3]);
    }

    #[tokio::test]
    async fn test_delete_with_non_numeric_code_deletes_nothing() {
        let table = Arc::new(RecordingTable::default());
        let service = CatalogService::new(table.clone(), None);

        let err = service
            .delete_products(vec!["1".into(), "x".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput(_)));
        assert!(table.deleted.lock().await.is_empty());
    }
}
