//! # Checkout Handlers
//!
//! ```text
//! POST /api/checkout
//! { "items": [{ "product_id": 1, "quantity": 3 }] }
//!      │
//!      ▼
//! TransactionRepository::checkout  (one BEGIN IMMEDIATE unit)
//!      │
//!      ├── Ok   → 201 Transaction with details
//!      └── Err  → 400 / 404 / 422 / 500, nothing committed
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use kasir_core::{CheckoutRequest, Transaction};

use crate::error::{ApiError, ApiResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

pub async fn checkout(
    State(state): State<AppState>,
    AppJson(request): AppJson<CheckoutRequest>,
) -> ApiResult<(StatusCode, AppJson<Transaction>)> {
    let transaction = state.db.transactions().checkout(&request.items).await?;
    Ok((StatusCode::CREATED, AppJson(transaction)))
}

/// Committed transaction with its detail lines, for receipts.
pub async fn get_transaction(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<AppJson<Transaction>> {
    state
        .db
        .transactions()
        .get_by_id(id)
        .await?
        .map(AppJson)
        .ok_or_else(|| ApiError::not_found("Transaction", id))
}
