//! Shared helpers for the in-process HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use catalog_server::AppState;
use catalog_server::BoxError;
use catalog_server::catalog::{CatalogService, ImagePolicy, ImageUploader};
use catalog_server::storage::MemoryImageStore;
use catalog_server::table::{MemoryProductTable, ProductTable};
use http::{HeaderMap, Request, StatusCode};
use shared::Product;
use tokio::sync::Mutex;
use tower::ServiceExt;

pub const CDN_URL: &str = "https://d111111abcdef8.cloudfront.net";
pub const MAX_IMAGE_BYTES: usize = 2_000_000;
pub const BOUNDARY: &str = "----catalog-test-boundary";

/// Memory table with switchable failures; records successful deletes in order
#[derive(Default)]
pub struct FlakyTable {
    pub inner: MemoryProductTable,
    pub fail_scan: bool,
    pub fail_put: bool,
    pub fail_delete_on: Option<i64>,
    pub deleted: Mutex<Vec<i64>>,
}

impl FlakyTable {
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            inner: MemoryProductTable::with_products(products),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ProductTable for FlakyTable {
    async fn scan(&self) -> Result<Vec<Product>, BoxError> {
        if self.fail_scan {
            return Err("ResourceNotFoundException: Requested resource not found".into());
        }
        self.inner.scan().await
    }

    async fn put(&self, product: &Product) -> Result<(), BoxError> {
        if self.fail_put {
            return Err("ProvisionedThroughputExceededException".into());
        }
        self.inner.put(product).await
    }

    async fn delete(&self, code: i64) -> Result<(), BoxError> {
        if self.fail_delete_on == Some(code) {
            return Err("ConditionalCheckFailedException".into());
        }
        self.inner.delete(code).await?;
        self.deleted.lock().await.push(code);
        Ok(())
    }
}

/// Variant without images
pub fn app_without_images(table: Arc<FlakyTable>) -> Router {
    catalog_server::api::create_router(AppState::new(CatalogService::new(table, None)))
}

/// Variant with images stored in memory and served from [`CDN_URL`]
pub fn app_with_images(table: Arc<FlakyTable>, store: Arc<MemoryImageStore>) -> Router {
    let uploader = ImageUploader::new(store, ImagePolicy::new(MAX_IMAGE_BYTES, CDN_URL));
    catalog_server::api::create_router(AppState::new(CatalogService::new(
        table,
        Some(uploader),
    )))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(http::header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: body.to_vec(),
    }
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .method(http::Method::GET)
        .body(Body::empty())
        .unwrap()
}

pub fn post_urlencoded(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .method(http::Method::POST)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: Vec<u8>,
    },
}

pub fn post_multipart(path: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .uri(path)
        .method(http::Method::POST)
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn product_parts<'a>(code: &'a str, name: &'a str, quantity: &'a str) -> Vec<Part<'a>> {
    vec![
        Part::Text("ma_sp", code),
        Part::Text("ten_sp", name),
        Part::Text("so_luong", quantity),
    ]
}

pub fn png(filename: &str, size: usize) -> Part<'_> {
    Part::File {
        name: "image",
        filename,
        content_type: "image/png",
        data: vec![0x89; size],
    }
}
