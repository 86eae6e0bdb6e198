//! Category CRUD over `/api/categories`.

use axum::extract::State;
use axum::http::StatusCode;
use kasir_core::validation::validate_new_category;
use kasir_core::{Category, NewCategory};

use crate::error::{ApiError, ApiResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<AppJson<Vec<Category>>> {
    Ok(AppJson(state.db.categories().list().await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<AppJson<Category>> {
    state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .map(AppJson)
        .ok_or_else(|| ApiError::not_found("Category", id))
}

pub async fn create_category(
    State(state): State<AppState>,
    AppJson(category): AppJson<NewCategory>,
) -> ApiResult<(StatusCode, AppJson<Category>)> {
    validate_new_category(&category)?;

    let created = state.db.categories().insert(&category).await?;
    Ok((StatusCode::CREATED, AppJson(created)))
}

pub async fn update_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(category): AppJson<NewCategory>,
) -> ApiResult<AppJson<Category>> {
    validate_new_category(&category)?;

    Ok(AppJson(state.db.categories().update(id, &category).await?))
}

/// Products in the category become uncategorized.
pub async fn delete_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<StatusCode> {
    state.db.categories().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
