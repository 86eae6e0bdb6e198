//! # Report Repository (Sales Aggregator)
//!
//! Read-only aggregates over committed transactions.
//!
//! ## Summary Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  today_summary()          window = [date('now'), date('now')]           │
//! │  summary_between(s, e)    window = [s, e]  (inclusive calendar days)    │
//! │       │                                                                 │
//! │       ▼   one read transaction, one consistent snapshot                 │
//! │  query_revenue_and_count(window)                                        │
//! │    SUM(total_amount) → 0 when empty                                     │
//! │    COUNT(*)                                                             │
//! │       │                                                                 │
//! │  query_best_seller(window)                                              │
//! │    GROUP BY product_id, SUM(quantity)                                   │
//! │    ORDER BY quantity DESC, product_id ASC   ← ties go to lowest id      │
//! │    name = snapshot name of the product's latest detail row              │
//! │    no rows → BestSellerProduct::default()                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Days are UTC calendar days by the store's clock. A window is matched as
//! the half-open range `[start, end + 1 day)` on the raw `created_at` text,
//! which sorts chronologically, so `idx_transactions_created_at` applies.

use chrono::NaiveDate;
use kasir_core::{BestSellerProduct, SalesSummary};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

// =============================================================================
// Report Window
// =============================================================================

/// An inclusive range of calendar days. `None` bounds mean "today" as seen
/// by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportWindow {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl ReportWindow {
    /// The store's current calendar day.
    pub fn today() -> Self {
        ReportWindow::default()
    }

    /// `start..=end`. A window with `start > end` matches nothing.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        ReportWindow {
            start: Some(start),
            end: Some(end),
        }
    }

    fn bounds(&self) -> (Option<String>, Option<String>) {
        let fmt = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
        (self.start.map(fmt), self.end.map(fmt))
    }
}

// =============================================================================
// Aggregation Queries
// =============================================================================

/// Total revenue and number of transactions in the window.
pub async fn query_revenue_and_count(
    conn: &mut SqliteConnection,
    window: &ReportWindow,
) -> DbResult<(i64, i64)> {
    let (start, end) = window.bounds();

    let row: (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(total_amount), 0) AS total_revenue,
            COUNT(*) AS total_transactions
        FROM transactions
        WHERE created_at >= COALESCE(?1, date('now'))
          AND created_at < COALESCE(date(?2, '+1 day'), date('now', '+1 day'))
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row)
}

/// The product with the most units sold in the window, if anything sold.
pub async fn query_best_seller(
    conn: &mut SqliteConnection,
    window: &ReportWindow,
) -> DbResult<Option<BestSellerProduct>> {
    let (start, end) = window.bounds();

    let best = sqlx::query_as::<_, BestSellerProduct>(
        r#"
        SELECT d.product_name AS name, b.quantity_sold
        FROM (
            SELECT
                td.product_id,
                SUM(td.quantity) AS quantity_sold,
                MAX(td.id) AS last_detail_id
            FROM transaction_details td
            JOIN transactions t ON t.id = td.transaction_id
            WHERE t.created_at >= COALESCE(?1, date('now'))
              AND t.created_at < COALESCE(date(?2, '+1 day'), date('now', '+1 day'))
            GROUP BY td.product_id
        ) b
        JOIN transaction_details d ON d.id = b.last_detail_id
        ORDER BY b.quantity_sold DESC, b.product_id ASC
        LIMIT 1
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(best)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sales reports.
///
/// ## Usage
/// ```rust,ignore
/// let summary = db.reports().today_summary().await?;
/// println!("{} transactions today", summary.total_transactions);
/// ```
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Sales summary for the store's current calendar day.
    ///
    /// An empty day is not an error: revenue and count are zero and the
    /// best seller is the zero value.
    pub async fn today_summary(&self) -> DbResult<SalesSummary> {
        self.summary(ReportWindow::today()).await
    }

    /// Sales summary for the inclusive range `start..=end`.
    pub async fn summary_between(&self, start: NaiveDate, end: NaiveDate) -> DbResult<SalesSummary> {
        self.summary(ReportWindow::between(start, end)).await
    }

    /// Runs both aggregates against one snapshot.
    pub async fn summary(&self, window: ReportWindow) -> DbResult<SalesSummary> {
        debug!(window = ?window, "Building sales summary");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let (total_revenue, total_transactions) = query_revenue_and_count(&mut *tx, &window).await?;
        let best_seller = query_best_seller(&mut *tx, &window)
            .await?
            .unwrap_or_default();

        tx.commit().await.map_err(DbError::transaction)?;

        debug!(
            total_revenue = total_revenue,
            total_transactions = total_transactions,
            best_seller = %best_seller.name,
            "Sales summary built"
        );

        Ok(SalesSummary {
            total_revenue,
            total_transactions,
            best_seller,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[test]
    fn test_window_bounds() {
        assert_eq!(ReportWindow::today().bounds(), (None, None));

        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(
            ReportWindow::between(start, end).bounds(),
            (Some("2026-01-01".to_string()), Some("2026-01-31".to_string()))
        );
    }

    #[tokio::test]
    async fn test_window_filter_uses_created_at_index() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let plan: Vec<(i64, i64, i64, String)> = sqlx::query_as(
            "EXPLAIN QUERY PLAN \
             SELECT COALESCE(SUM(total_amount), 0) FROM transactions \
             WHERE created_at >= COALESCE(?1, date('now')) \
               AND created_at < COALESCE(date(?2, '+1 day'), date('now', '+1 day'))",
        )
        .bind(Some("2026-01-01"))
        .bind(Some("2026-01-31"))
        .fetch_all(db.pool())
        .await
        .unwrap();

        assert!(
            plan.iter()
                .any(|(_, _, _, detail)| detail.contains("idx_transactions_created_at")),
            "plan: {:?}",
            plan
        );
    }

    #[tokio::test]
    async fn test_empty_store_gives_zero_summary() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let summary = db.reports().today_summary().await.unwrap();
        assert_eq!(summary, SalesSummary::default());
        assert_eq!(summary.best_seller.name, "");
        assert_eq!(summary.best_seller.quantity_sold, 0);
    }
}
