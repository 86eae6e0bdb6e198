//! # Transaction Repository (Checkout Engine)
//!
//! Turns a cart into a committed sale: one header row, one detail row per
//! cart line, and the matching stock decrements, all or nothing.
//!
//! ## Checkout Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout([{1, 3}, {3, 2}])                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_cart ─── empty / qty <= 0 / too many lines → Rejected        │
//! │       │            (no storage touched)                                 │
//! │       ▼                                                                 │
//! │  BEGIN IMMEDIATE ─── takes the database write lock up front            │
//! │       │              (other writers wait up to busy_timeout)            │
//! │       ▼                                                                 │
//! │  for each line, in cart order:                                         │
//! │    read_product_for_update(id)  → None          → ProductNotFound      │
//! │    price_line(snapshot, qty)    → stock < qty   → InsufficientStock    │
//! │    decrement_stock(id, qty)                                            │
//! │    tally.push(line)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  insert_transaction(total)             → (id, created_at)              │
//! │  bulk_insert_transaction_details(...)  → one INSERT for every line     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Any error before COMMIT drops the transaction → ROLLBACK.             │
//! │  No stock changes, no header, no details.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why BEGIN IMMEDIATE?
//! A deferred SQLite transaction only takes the write lock at its first
//! write, so two checkouts could both read `stock = 2` before either
//! decrements. `BEGIN IMMEDIATE` takes the lock before the first read, so the
//! read-check-decrement sequence for every line is serialized against all
//! other writers.

use chrono::{DateTime, Utc};
use kasir_core::checkout::{price_line, validate_cart, CheckoutTally, PricedLine};
use kasir_core::{CheckoutItem, CoreError, StockSnapshot, Transaction, TransactionDetail};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{CheckoutError, CheckoutResult, DbError, DbResult};

// =============================================================================
// Data-Access Steps
// =============================================================================
// Each step runs on the connection of an already-open checkout transaction.

/// Reads the fields a checkout line needs.
///
/// Callers must hold the write lock (`BEGIN IMMEDIATE`) so the row cannot
/// change before the matching [`decrement_stock`].
pub async fn read_product_for_update(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> DbResult<Option<StockSnapshot>> {
    let snapshot = sqlx::query_as::<_, StockSnapshot>(
        "SELECT id, name, price, stock FROM products WHERE id = ?1",
    )
    .bind(product_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(snapshot)
}

/// Subtracts `amount` from a product's stock.
///
/// The schema's `CHECK (stock >= 0)` rejects any decrement that would go
/// negative.
pub async fn decrement_stock(
    conn: &mut SqliteConnection,
    product_id: i64,
    amount: i64,
) -> DbResult<()> {
    let result = sqlx::query("UPDATE products SET stock = stock - ?2 WHERE id = ?1")
        .bind(product_id)
        .bind(amount)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Product", product_id));
    }

    Ok(())
}

/// Inserts a transaction header. The store assigns the id and timestamp.
pub async fn insert_transaction(
    conn: &mut SqliteConnection,
    total_amount: i64,
) -> DbResult<(i64, DateTime<Utc>)> {
    let row: (i64, DateTime<Utc>) = sqlx::query_as(
        "INSERT INTO transactions (total_amount) VALUES (?1) RETURNING id, created_at",
    )
    .bind(total_amount)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row)
}

/// Inserts every detail row of a transaction in one statement.
///
/// ## Returns
/// The inserted rows in insertion order (ascending id).
pub async fn bulk_insert_transaction_details(
    conn: &mut SqliteConnection,
    transaction_id: i64,
    lines: &[PricedLine],
) -> DbResult<Vec<TransactionDetail>> {
    if lines.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
        "INSERT INTO transaction_details \
         (transaction_id, product_id, product_name, quantity, subtotal) ",
    );
    builder.push_values(lines, |mut row, line| {
        row.push_bind(transaction_id)
            .push_bind(line.product_id)
            .push_bind(line.product_name.as_str())
            .push_bind(line.quantity)
            .push_bind(line.subtotal);
    });
    builder.push(" RETURNING id, transaction_id, product_id, product_name, quantity, subtotal");

    let mut details = builder
        .build_query_as::<TransactionDetail>()
        .fetch_all(&mut *conn)
        .await?;

    // RETURNING order is unspecified in SQLite
    details.sort_by_key(|d| d.id);
    Ok(details)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sales transactions.
///
/// ## Usage
/// ```rust,ignore
/// let repo = TransactionRepository::new(pool);
///
/// let tx = repo.checkout(&[CheckoutItem::new(1, 3)]).await?;
/// assert_eq!(tx.total_amount, 10_500);
///
/// let receipt = repo.get_by_id(tx.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Checks out a cart as one atomic unit.
    ///
    /// ## Arguments
    /// * `items` - Cart lines, processed in order. Repeated products are
    ///   processed independently; each read sees earlier decrements.
    ///
    /// ## Returns
    /// * `Ok(Transaction)` - Committed sale with its details
    /// * `Err(CheckoutError::Rejected)` - Bad input, unknown product, or
    ///   insufficient stock. Nothing was written.
    /// * `Err(CheckoutError::Storage)` - Lock timeout or I/O failure.
    ///   Nothing was written.
    pub async fn checkout(&self, items: &[CheckoutItem]) -> CheckoutResult<Transaction> {
        validate_cart(items)?;

        debug!(lines = items.len(), "Starting checkout");

        let result = self.checkout_locked(items).await;

        match &result {
            Ok(tx) => info!(
                id = tx.id,
                total = %tx.total(),
                lines = tx.details.len(),
                "Checkout committed"
            ),
            Err(CheckoutError::Rejected(reason)) => {
                warn!(reason = %reason, "Checkout rejected")
            }
            Err(CheckoutError::Storage(e)) => warn!(error = %e, "Checkout failed in storage"),
        }

        result
    }

    async fn checkout_locked(&self, items: &[CheckoutItem]) -> CheckoutResult<Transaction> {
        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(DbError::transaction)?;

        let mut tally = CheckoutTally::with_capacity(items.len());

        for item in items {
            let snapshot = read_product_for_update(&mut *tx, item.product_id)
                .await?
                .ok_or(CoreError::ProductNotFound {
                    product_id: item.product_id,
                })?;

            let line = price_line(&snapshot, item.quantity)?;
            decrement_stock(&mut *tx, item.product_id, item.quantity).await?;

            debug!(
                product_id = item.product_id,
                quantity = item.quantity,
                subtotal = line.subtotal,
                "Line priced"
            );
            tally.push(line)?;
        }

        let (id, created_at) = insert_transaction(&mut *tx, tally.total().minor()).await?;
        let details = bulk_insert_transaction_details(&mut *tx, id, tally.lines()).await?;

        tx.commit().await.map_err(DbError::transaction)?;

        Ok(Transaction {
            id,
            total_amount: tally.total().minor(),
            created_at,
            details,
        })
    }

    /// Gets a committed transaction with its details.
    ///
    /// ## Returns
    /// * `Ok(Some(Transaction))` - Found, details ordered by id
    /// * `Ok(None)` - No such transaction
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let header: Option<(i64, i64, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, total_amount, created_at)) = header else {
            return Ok(None);
        };

        let details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT id, transaction_id, product_id, product_name, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Transaction {
            id,
            total_amount,
            created_at,
            details,
        }))
    }

    /// Counts committed transactions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use kasir_core::NewProduct;

    async fn seeded(stock: i64) -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                name: "Indomie Godog".to_string(),
                price: 3500,
                stock,
                category_id: None,
            })
            .await
            .unwrap();
        (db, product.id)
    }

    #[tokio::test]
    async fn test_step_functions_inside_one_transaction() {
        let (db, id) = seeded(10).await;
        let mut tx = db.pool().begin().await.unwrap();

        let snapshot = read_product_for_update(&mut *tx, id).await.unwrap().unwrap();
        assert_eq!(snapshot.product_id, id);
        assert_eq!(snapshot.stock, 10);

        decrement_stock(&mut *tx, id, 4).await.unwrap();
        let snapshot = read_product_for_update(&mut *tx, id).await.unwrap().unwrap();
        assert_eq!(snapshot.stock, 6);

        assert!(read_product_for_update(&mut *tx, 999).await.unwrap().is_none());
        tx.rollback().await.unwrap();

        let detail = db.products().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(detail.stock, 10);
    }

    #[tokio::test]
    async fn test_decrement_below_zero_hits_check_constraint() {
        let (db, id) = seeded(1).await;
        let mut tx = db.pool().begin().await.unwrap();

        let err = decrement_stock(&mut *tx, id, 2).await.unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }));
    }

    #[tokio::test]
    async fn test_bulk_insert_returns_rows_in_order() {
        let (db, id) = seeded(10).await;
        let mut tx = db.pool().begin().await.unwrap();

        let (tx_id, _) = insert_transaction(&mut *tx, 7000).await.unwrap();
        let lines = vec![
            PricedLine {
                product_id: id,
                product_name: "Indomie Godog".to_string(),
                quantity: 1,
                subtotal: 3500,
            },
            PricedLine {
                product_id: id,
                product_name: "Indomie Godog".to_string(),
                quantity: 1,
                subtotal: 3500,
            },
        ];
        let details = bulk_insert_transaction_details(&mut *tx, tx_id, &lines)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(details.len(), 2);
        assert!(details[0].id < details[1].id);
        assert!(details.iter().all(|d| d.transaction_id == tx_id));
    }

    #[tokio::test]
    async fn test_checkout_and_read_back() {
        let (db, id) = seeded(10).await;

        let tx = db
            .transactions()
            .checkout(&[CheckoutItem::new(id, 3)])
            .await
            .unwrap();

        let receipt = db.transactions().get_by_id(tx.id).await.unwrap().unwrap();
        assert_eq!(receipt, tx);
        assert!(db.transactions().get_by_id(tx.id + 1).await.unwrap().is_none());
    }
}
