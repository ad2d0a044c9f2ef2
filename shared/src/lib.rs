//! Shared types for the catalog service
//!
//! The unified error system and the product model, used by the server and
//! by anything that consumes its JSON error envelope.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use models::Product;
pub use serde::{Deserialize, Serialize};
