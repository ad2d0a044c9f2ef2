//! catalog-server: product catalog backed by DynamoDB, images on S3
//!
//! Lists, adds and bulk-deletes product records. With image upload enabled,
//! every new product carries an image stored in S3 and served through the
//! configured CDN URL.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod table;

pub use config::Config;
pub use state::AppState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
