//! Catalog page handlers

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;
use http::header::LOCATION;

use super::form::{FieldNames, ProductForm};
use super::view;
use crate::error::CatalogResult;
use crate::state::AppState;

/// 302 Found back to the listing
fn to_listing() -> Response {
    (StatusCode::FOUND, [(LOCATION, "/")]).into_response()
}

/// GET / - the full catalog as an HTML page
pub async fn list_page(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    let products = state.catalog.list_products().await?;
    Ok(Html(view::render_catalog(
        &products,
        state.catalog.image_upload_enabled(),
    )))
}

/// POST / - add (or replace) a product, then back to the listing
pub async fn create(
    State(state): State<AppState>,
    ProductForm(form): ProductForm,
) -> CatalogResult<Response> {
    state.catalog.create_product(form).await?;
    Ok(to_listing())
}

/// POST /delete - delete every product whose code is a submitted field name
pub async fn delete(
    State(state): State<AppState>,
    FieldNames(codes): FieldNames,
) -> CatalogResult<Response> {
    state.catalog.delete_products(codes).await?;
    Ok(to_listing())
}
