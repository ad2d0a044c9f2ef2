//! Form extractors
//!
//! Both forms arrive either URL-encoded or as `multipart/form-data`; the
//! extractors pick the decoder from the request's `Content-Type`.

use axum::Form;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use http::StatusCode;
use http::header::CONTENT_TYPE;
use shared::error::{AppError, ErrorCode};

use crate::catalog::{FIELD_CODE, FIELD_IMAGE, FIELD_NAME, FIELD_QUANTITY, ImageUpload, NewProduct};
use crate::state::AppState;

/// Fallback when a file part declares no type
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(ErrorCode::FileTooLarge)
    } else {
        AppError::invalid_request(format!("Invalid multipart request: {}", e.body_text()))
    }
}

async fn form_pairs<S>(req: Request, state: &S) -> Result<Vec<(String, String)>, AppError>
where
    S: Send + Sync,
{
    let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
        .await
        .map_err(|e| AppError::invalid_request(e.body_text()))?;
    Ok(pairs)
}

async fn multipart<S>(req: Request, state: &S) -> Result<Multipart, AppError>
where
    S: Send + Sync,
{
    Multipart::from_request(req, state)
        .await
        .map_err(|e| AppError::invalid_request(e.body_text()))
}

/// The add-product form as submitted
///
/// Repeated text fields keep their first value. A file part without a file
/// name counts as no file, which is what browsers send for an empty input.
/// With image upload disabled the file part is skipped unread.
#[derive(Debug)]
pub struct ProductForm(pub NewProduct);

impl ProductForm {
    fn set_text(form: &mut NewProduct, name: &str, value: String) {
        let slot = match name {
            FIELD_CODE => &mut form.code,
            FIELD_NAME => &mut form.name,
            FIELD_QUANTITY => &mut form.quantity,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

impl FromRequest<AppState> for ProductForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let keep_image = state.catalog.image_upload_enabled();
        let mut form = NewProduct::default();

        if !is_multipart(&req) {
            for (name, value) in form_pairs(req, state).await? {
                Self::set_text(&mut form, &name, value);
            }
            return Ok(Self(form));
        }

        let mut multipart = multipart(req, state).await?;
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(|s| s.to_string()) else {
                continue;
            };

            if name == FIELD_IMAGE {
                let filename = field.file_name().unwrap_or_default().to_string();
                if !keep_image || filename.is_empty() || form.image.is_some() {
                    continue;
                }
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                form.image = Some(ImageUpload {
                    filename,
                    content_type,
                    data,
                });
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                Self::set_text(&mut form, &name, value);
            }
        }

        Ok(Self(form))
    }
}

/// Names of the submitted fields, deduplicated, in order of first appearance
///
/// The bulk-delete form names each checked checkbox after the product code;
/// values are ignored.
#[derive(Debug)]
pub struct FieldNames(pub Vec<String>);

impl FieldNames {
    fn push(names: &mut Vec<String>, name: String) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
}

impl<S> FromRequest<S> for FieldNames
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut names = Vec::new();

        if is_multipart(&req) {
            let mut multipart = multipart(req, state).await?;
            while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
                if let Some(name) = field.name() {
                    Self::push(&mut names, name.to_string());
                }
            }
        } else {
            for (name, _) in form_pairs(req, state).await? {
                Self::push(&mut names, name);
            }
        }

        Ok(Self(names))
    }
}
