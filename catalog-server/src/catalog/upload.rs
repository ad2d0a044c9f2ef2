//! Image upload policy: what may be uploaded, where it goes, and the URL
//! it is served from afterwards.

use std::path::Path;

use uuid::Uuid;

use super::input::ImageUpload;
use crate::error::CatalogError;

/// Accepted image types, matched against both the file extension and the
/// MIME subtype
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["jpeg", "jpg", "png", "gif"];

/// Logical folder for all uploaded objects
pub const UPLOAD_PREFIX: &str = "uploads/";

#[derive(Debug, Clone)]
pub struct ImagePolicy {
    max_bytes: usize,
    public_base_url: String,
}

impl ImagePolicy {
    pub fn new(max_bytes: usize, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            max_bytes,
            public_base_url,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Type check first, then size
    pub fn validate(&self, image: &ImageUpload) -> Result<(), CatalogError> {
        if !(extension_allowed(&image.filename) && mime_allowed(&image.content_type)) {
            return Err(CatalogError::InvalidFileType {
                filename: image.filename.clone(),
                content_type: image.content_type.clone(),
            });
        }

        if image.data.len() > self.max_bytes {
            return Err(CatalogError::PayloadTooLarge {
                size: image.data.len(),
                max: self.max_bytes,
            });
        }

        Ok(())
    }

    /// `uploads/{uuid}-{filename}`; unique even when file names collide
    pub fn object_key(&self, filename: &str) -> String {
        format!("{UPLOAD_PREFIX}{}-{filename}", Uuid::new_v4())
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }
}

fn extension_allowed(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| ALLOWED_IMAGE_TYPES.contains(&e.as_str()))
}

fn mime_allowed(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .is_ok_and(|m| {
            m.type_() == mime::IMAGE && ALLOWED_IMAGE_TYPES.contains(&m.subtype().as_str())
        })
}
