//! Raw form input and its coercion into typed values

use axum::body::Bytes;

use crate::error::InvalidInput;

pub const FIELD_CODE: &str = "ma_sp";
pub const FIELD_NAME: &str = "ten_sp";
pub const FIELD_QUANTITY: &str = "so_luong";
pub const FIELD_IMAGE: &str = "image";

/// An uploaded file as it arrived in the request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied file name (not sanitized)
    pub filename: String,
    /// Declared MIME type of the part
    pub content_type: String,
    pub data: Bytes,
}

/// Add-product form before validation; every field is text as submitted
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub code: Option<String>,
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Parse a base-10 integer field. Surrounding whitespace is ignored; anything
/// else that is not an integer is refused rather than stored.
pub fn parse_integer(field: &'static str, raw: &str) -> Result<i64, InvalidInput> {
    raw.trim()
        .parse()
        .map_err(|_| InvalidInput::NotAnInteger {
            field,
            value: raw.to_string(),
        })
}

pub(crate) fn required<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, InvalidInput> {
    value.ok_or(InvalidInput::MissingField(field))
}
