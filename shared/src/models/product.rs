//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// Serialized field names are the table's attribute names, so the same
/// names appear in the add-product form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product code, the table's partition key
    #[serde(rename = "ma_sp")]
    pub code: i64,
    #[serde(rename = "ten_sp")]
    pub name: String,
    #[serde(rename = "so_luong")]
    pub quantity: i64,
    /// Public URL of the product image (only when uploaded at creation)
    #[serde(rename = "image_url", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    pub fn new(code: i64, name: impl Into<String>, quantity: i64) -> Self {
        Self {
            code,
            name: name.into(),
            quantity,
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}
