//! Integration tests for sales aggregation.

use chrono::{NaiveDate, Utc};
use kasir_core::{BestSellerProduct, CheckoutItem, NewProduct, SalesSummary};
use kasir_db::{Database, DbConfig};

async fn memory_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

async fn add_product(db: &Database, name: &str, price: i64, stock: i64) -> i64 {
    db.products()
        .insert(&NewProduct {
            name: name.to_string(),
            price,
            stock,
            category_id: None,
        })
        .await
        .unwrap()
        .id
}

/// Writes a committed sale with a fixed timestamp, bypassing checkout.
async fn backdated_sale(db: &Database, created_at: &str, product_id: i64, name: &str, qty: i64, subtotal: i64) {
    let (tx_id,): (i64,) = sqlx::query_as(
        "INSERT INTO transactions (total_amount, created_at) VALUES (?1, ?2) RETURNING id",
    )
    .bind(subtotal)
    .bind(created_at)
    .fetch_one(db.pool())
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO transaction_details \
         (transaction_id, product_id, product_name, quantity, subtotal) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(tx_id)
    .bind(product_id)
    .bind(name)
    .bind(qty)
    .bind(subtotal)
    .execute(db.pool())
    .await
    .unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_empty_store_summary_is_zero() {
    let db = memory_db().await;

    let summary = db.reports().today_summary().await.unwrap();

    assert_eq!(summary.total_revenue, 0);
    assert_eq!(summary.total_transactions, 0);
    assert_eq!(summary.best_seller, BestSellerProduct::default());
}

#[tokio::test]
async fn test_today_summary_after_checkouts() {
    let db = memory_db().await;
    let indomie = add_product(&db, "Indomie Godog", 3500, 10).await;
    let kecap = add_product(&db, "Kecap", 13_000, 20).await;

    let checkouts = db.transactions();
    checkouts
        .checkout(&[CheckoutItem::new(indomie, 3)])
        .await
        .unwrap();
    checkouts
        .checkout(&[CheckoutItem::new(kecap, 1), CheckoutItem::new(indomie, 2)])
        .await
        .unwrap();

    let summary = db.reports().today_summary().await.unwrap();

    assert_eq!(
        summary,
        SalesSummary {
            total_revenue: 10_500 + 13_000 + 7000,
            total_transactions: 2,
            best_seller: BestSellerProduct {
                name: "Indomie Godog".to_string(),
                quantity_sold: 5,
            },
        }
    );
}

#[tokio::test]
async fn test_rejected_checkout_not_counted() {
    let db = memory_db().await;
    let id = add_product(&db, "Indomie Godog", 3500, 2).await;

    assert!(db
        .transactions()
        .checkout(&[CheckoutItem::new(id, 5)])
        .await
        .is_err());

    let summary = db.reports().today_summary().await.unwrap();
    assert_eq!(summary, SalesSummary::default());
}

#[tokio::test]
async fn test_best_seller_tie_goes_to_lowest_product_id() {
    let db = memory_db().await;
    let first = add_product(&db, "Indomie Godog", 3500, 10).await;
    let second = add_product(&db, "Vit 1000ml", 3000, 10).await;
    assert!(first < second);

    // sell the higher id first so insertion order can't decide the tie
    db.transactions()
        .checkout(&[CheckoutItem::new(second, 3)])
        .await
        .unwrap();
    db.transactions()
        .checkout(&[CheckoutItem::new(first, 3)])
        .await
        .unwrap();

    let best = db.reports().today_summary().await.unwrap().best_seller;
    assert_eq!(best.name, "Indomie Godog");
    assert_eq!(best.quantity_sold, 3);
}

#[tokio::test]
async fn test_renamed_product_counts_as_one_entry() {
    let db = memory_db().await;
    let vit = add_product(&db, "Vit 600ml", 3000, 20).await;
    let kecap = add_product(&db, "Kecap", 13_000, 20).await;

    db.transactions()
        .checkout(&[CheckoutItem::new(vit, 2), CheckoutItem::new(kecap, 3)])
        .await
        .unwrap();

    db.products()
        .update(
            vit,
            &NewProduct {
                name: "Vit 1000ml".to_string(),
                price: 3000,
                stock: 18,
                category_id: None,
            },
        )
        .await
        .unwrap();

    db.transactions()
        .checkout(&[CheckoutItem::new(vit, 2)])
        .await
        .unwrap();

    // 2 + 2 under two names still beats 3, reported under the latest name
    let best = db.reports().today_summary().await.unwrap().best_seller;
    assert_eq!(best.name, "Vit 1000ml");
    assert_eq!(best.quantity_sold, 4);
}

#[tokio::test]
async fn test_summary_between_uses_inclusive_days() {
    let db = memory_db().await;
    let indomie = add_product(&db, "Indomie Godog", 3500, 100).await;
    let vit = add_product(&db, "Vit 1000ml", 3000, 100).await;

    backdated_sale(&db, "2026-01-09T23:59:59.999Z", vit, "Vit 1000ml", 10, 30_000).await;
    backdated_sale(&db, "2026-01-10T00:00:00.000Z", indomie, "Indomie Godog", 2, 7000).await;
    backdated_sale(&db, "2026-01-12T12:30:00.000Z", vit, "Vit 1000ml", 1, 3000).await;
    backdated_sale(&db, "2026-01-15T23:59:59.999Z", indomie, "Indomie Godog", 1, 3500).await;
    backdated_sale(&db, "2026-01-16T00:00:00.000Z", vit, "Vit 1000ml", 50, 150_000).await;

    let summary = db
        .reports()
        .summary_between(date(2026, 1, 10), date(2026, 1, 15))
        .await
        .unwrap();

    assert_eq!(summary.total_transactions, 3);
    assert_eq!(summary.total_revenue, 7000 + 3000 + 3500);
    assert_eq!(summary.best_seller.name, "Indomie Godog");
    assert_eq!(summary.best_seller.quantity_sold, 3);

    let single_day = db
        .reports()
        .summary_between(date(2026, 1, 16), date(2026, 1, 16))
        .await
        .unwrap();
    assert_eq!(single_day.total_transactions, 1);
    assert_eq!(single_day.best_seller.quantity_sold, 50);

    // backdated sales are not today's
    let today = db.reports().today_summary().await.unwrap();
    assert_eq!(today, SalesSummary::default());
}

#[tokio::test]
async fn test_range_end_rolls_over_month_and_year() {
    let db = memory_db().await;
    let kecap = add_product(&db, "Kecap", 13_000, 100).await;

    backdated_sale(&db, "2026-12-31T23:59:59.999Z", kecap, "Kecap", 1, 13_000).await;
    backdated_sale(&db, "2027-01-01T00:00:00.000Z", kecap, "Kecap", 2, 26_000).await;

    let december = db
        .reports()
        .summary_between(date(2026, 12, 1), date(2026, 12, 31))
        .await
        .unwrap();
    assert_eq!(december.total_transactions, 1);
    assert_eq!(december.total_revenue, 13_000);

    let new_year = db
        .reports()
        .summary_between(date(2027, 1, 1), date(2027, 1, 1))
        .await
        .unwrap();
    assert_eq!(new_year.total_transactions, 1);
    assert_eq!(new_year.best_seller.quantity_sold, 2);
}

#[tokio::test]
async fn test_today_matches_explicit_range_for_today() {
    let db = memory_db().await;
    let id = add_product(&db, "Kecap", 13_000, 20).await;
    db.transactions()
        .checkout(&[CheckoutItem::new(id, 2)])
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let ranged = db.reports().summary_between(today, today).await.unwrap();
    let implicit = db.reports().today_summary().await.unwrap();

    assert_eq!(ranged, implicit);
    assert_eq!(implicit.total_revenue, 26_000);
}
