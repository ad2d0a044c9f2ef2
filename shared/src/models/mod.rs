//! Data models
//!
//! Shared between the catalog server and anything that reads its records.
//! Codes and quantities are `i64` (DynamoDB Number attributes).

pub mod product;

// Re-exports
pub use product::*;
