//! Catalog service error type
//!
//! `CatalogError` is what the catalog operations return. Client mistakes map
//! to a specific `AppError`; remote failures are logged here and replaced by
//! a generic `InternalError` so nothing about the table or bucket leaks to
//! the caller.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::BoxError;

/// A request the service refuses before touching any remote store
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be an integer, got '{value}'")]
    NotAnInteger { field: &'static str, value: String },
    #[error("No file uploaded")]
    MissingImage,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("unsupported image '{filename}' ({content_type})")]
    InvalidFileType {
        filename: String,
        content_type: String,
    },

    #[error("image is {size} bytes, limit is {max}")]
    PayloadTooLarge { size: usize, max: usize },

    /// Product table scan/put/delete failed
    #[error("product table error: {0}")]
    RemoteStore(BoxError),

    /// Image store rejected the upload
    #[error("image upload failed: {0}")]
    Upload(BoxError),
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::InvalidInput(input) => {
                let message = input.to_string();
                match input {
                    InvalidInput::MissingField(field) => {
                        AppError::with_message(ErrorCode::RequiredField, message)
                            .with_detail("field", field)
                    }
                    InvalidInput::NotAnInteger { field, .. } => {
                        AppError::with_message(ErrorCode::InvalidFormat, message)
                            .with_detail("field", field)
                    }
                    InvalidInput::MissingImage => AppError::new(ErrorCode::NoFileProvided),
                }
            }
            CatalogError::InvalidFileType { .. } => {
                AppError::new(ErrorCode::UnsupportedFileFormat)
                    .with_detail("allowed", crate::catalog::ALLOWED_IMAGE_TYPES.join(", "))
            }
            CatalogError::PayloadTooLarge { size, max } => AppError::with_message(
                ErrorCode::FileTooLarge,
                format!("image is {size} bytes, limit is {max}"),
            )
            .with_detail("max_bytes", max),
            CatalogError::RemoteStore(err) => {
                tracing::error!(error = %err, "Product table request failed");
                AppError::new(ErrorCode::InternalError)
            }
            CatalogError::Upload(err) => {
                tracing::error!(error = %err, "Image upload failed");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
