//! # Product Handlers
//!
//! Catalog CRUD over `/api/products`.
//!
//! | Method | Path                 | Result                  |
//! |--------|----------------------|-------------------------|
//! | GET    | `/api/products`      | `Vec<Product>`          |
//! | POST   | `/api/products`      | 201 `Product`           |
//! | GET    | `/api/products/:id`  | `ProductDetail`         |
//! | PUT    | `/api/products/:id`  | `Product`               |
//! | DELETE | `/api/products/:id`  | 204                     |

use axum::extract::State;
use axum::http::StatusCode;
use kasir_core::validation::{validate_new_product, validate_search_query};
use kasir_core::{NewProduct, Product, ProductDetail};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

/// `?name=` filter for the product list.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub name: Option<String>,
}

pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ProductQuery>,
) -> ApiResult<AppJson<Vec<Product>>> {
    let filter = match query.name {
        Some(name) => validate_search_query(&name)?,
        None => None,
    };

    let products = state.db.products().list(filter.as_deref()).await?;
    debug!(count = products.len(), "Listed products");
    Ok(AppJson(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<AppJson<ProductDetail>> {
    state
        .db
        .products()
        .get_by_id(id)
        .await?
        .map(AppJson)
        .ok_or_else(|| ApiError::not_found("Product", id))
}

pub async fn create_product(
    State(state): State<AppState>,
    AppJson(product): AppJson<NewProduct>,
) -> ApiResult<(StatusCode, AppJson<Product>)> {
    validate_new_product(&product)?;

    let created = state.db.products().insert(&product).await?;
    Ok((StatusCode::CREATED, AppJson(created)))
}

pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(product): AppJson<NewProduct>,
) -> ApiResult<AppJson<Product>> {
    validate_new_product(&product)?;

    let updated = state.db.products().update(id, &product).await?;
    Ok(AppJson(updated))
}

/// Products that appear on a committed transaction can't be deleted (409).
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<StatusCode> {
    state.db.products().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
