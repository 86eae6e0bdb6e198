//! Sales summary endpoints.

use axum::extract::State;
use kasir_core::validation::validate_date_range;
use kasir_core::SalesSummary;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{AppJson, AppQuery};
use crate::state::AppState;

/// `?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`, both required.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// `GET /api/report/today`
pub async fn today(State(state): State<AppState>) -> ApiResult<AppJson<SalesSummary>> {
    Ok(AppJson(state.db.reports().today_summary().await?))
}

/// `GET /api/report`: inclusive range of calendar days (UTC).
pub async fn between(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ReportQuery>,
) -> ApiResult<AppJson<SalesSummary>> {
    // a missing bound parses as empty and is reported as required
    let (start, end) = validate_date_range(
        query.start_date.as_deref().unwrap_or_default(),
        query.end_date.as_deref().unwrap_or_default(),
    )?;

    Ok(AppJson(state.db.reports().summary_between(start, end).await?))
}
