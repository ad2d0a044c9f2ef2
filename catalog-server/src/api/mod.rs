//! HTTP routes for catalog-server

pub mod catalog;
pub mod form;
pub mod health;
pub mod view;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue, Uri};
use shared::error::AppError;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::catalog::UPLOAD_PREFIX;
use crate::config::DEFAULT_MAX_IMAGE_BYTES;
use crate::state::AppState;

/// Room left in a request body for the text fields and multipart framing.
/// With uploads disabled the image allowance stays at the default so an
/// ignored file part is not refused.
pub const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Serve an image held by the in-memory store
async fn local_image(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let key = format!("{UPLOAD_PREFIX}{key}");
    let object = match &state.local_images {
        Some(store) => store.get(&key).await,
        None => None,
    };
    let object = object.ok_or_else(|| AppError::not_found("Image"))?;
    Ok(([(CONTENT_TYPE, object.content_type)], object.body).into_response())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_page).post(catalog::create))
        .route("/delete", post(catalog::delete))
        .route("/health", get(health::health_check))
        .route("/uploads/{*key}", get(local_image))
        .fallback(not_found)
}

/// Build the application with middleware and state
///
/// Used by both the HTTP server and in-process tests
pub fn create_router(state: AppState) -> Router {
    let body_limit = state
        .catalog
        .max_image_bytes()
        .unwrap_or(DEFAULT_MAX_IMAGE_BYTES)
        + FORM_OVERHEAD_BYTES;

    build_router()
        .layer(DefaultBodyLimit::max(body_limit))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .with_state(state)
}
