//! # Domain Types
//!
//! Core domain types used throughout Kasir POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog                       Sales                                    │
//! │  ┌─────────────────┐           ┌─────────────────┐                      │
//! │  │    Category     │           │   Transaction   │  header, immutable   │
//! │  │  id, name       │           │  id             │                      │
//! │  └────────┬────────┘           │  total_amount   │                      │
//! │           │ 0..1               │  created_at     │                      │
//! │  ┌────────▼────────┐           └────────┬────────┘                      │
//! │  │    Product      │                    │ 1..n                          │
//! │  │  id, name       │◄─────────┌─────────▼─────────┐                     │
//! │  │  price, stock   │ product  │ TransactionDetail │  name snapshot,     │
//! │  └─────────────────┘   _id    │ quantity, subtotal│  priced at sale     │
//! │                               └───────────────────┘                     │
//! │                                                                         │
//! │  Input: CheckoutItem        Derived: SalesSummary / BestSellerProduct   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every persisted entity is keyed by a store-generated `i64` id. Amounts
//! are plain `i64` minor units on the wire; use the `Money` accessors for
//! arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product grouping shown in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Payload for creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-generated identifier.
    pub id: i64,

    /// Display name shown to the cashier and copied onto receipts.
    pub name: String,

    /// Unit price in minor units.
    pub price: i64,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Optional category.
    pub category_id: Option<i64>,
}

/// A product joined with its category name, for detail views.
///
/// `category_name` is `None` when the product is uncategorized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductDetail {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub stock: i64,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
}

// =============================================================================
// Checkout Input
// =============================================================================

/// One requested line of a cart. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

impl CheckoutItem {
    /// Shorthand used by callers assembling carts in code.
    pub const fn new(product_id: i64, quantity: i64) -> Self {
        CheckoutItem {
            product_id,
            quantity,
        }
    }
}

/// The checkout request body: `{ "items": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

/// A product row as read under the checkout write lock.
///
/// Only the fields the pricing rules need.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockSnapshot {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "id"))]
    pub product_id: i64,
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

// =============================================================================
// Transaction
// =============================================================================

/// A committed sale: header plus its line items.
///
/// `total_amount` always equals the sum of `details[*].subtotal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: i64,
    pub total_amount: i64,
    /// Set by the store at insert time (UTC).
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub details: Vec<TransactionDetail>,
}

impl Transaction {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor(self.total_amount)
    }
}

/// One line of a committed sale.
///
/// `product_name` and `subtotal` are snapshots taken at sale time, so later
/// catalog edits never change history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub subtotal: i64,
}

// =============================================================================
// Reporting
// =============================================================================

/// Sales aggregate over a window of calendar days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub total_revenue: i64,
    pub total_transactions: i64,
    pub best_seller: BestSellerProduct,
}

/// The product with the highest quantity sold in a window.
///
/// The zero value (empty name, zero quantity) means nothing was sold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct BestSellerProduct {
    pub name: String,
    pub quantity_sold: i64,
}

impl BestSellerProduct {
    /// True when nothing was sold in the window.
    pub fn is_empty(&self) -> bool {
        self.quantity_sold == 0 && self.name.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_summary_default_is_zero_value() {
        let summary = SalesSummary::default();
        assert_eq!(summary.total_revenue, 0);
        assert_eq!(summary.total_transactions, 0);
        assert!(summary.best_seller.is_empty());
    }

    #[test]
    fn test_checkout_request_deserializes() {
        let req: CheckoutRequest =
            serde_json::from_str(r#"{"items":[{"product_id":1,"quantity":3}]}"#).unwrap();
        assert_eq!(req.items, vec![CheckoutItem::new(1, 3)]);
    }

    #[test]
    fn test_new_product_category_is_optional() {
        let p: NewProduct =
            serde_json::from_str(r#"{"name":"Kecap","price":13000,"stock":20}"#).unwrap();
        assert_eq!(p.category_id, None);
    }

    #[test]
    fn test_summary_serializes_snake_case() {
        let summary = SalesSummary {
            total_revenue: 10_500,
            total_transactions: 1,
            best_seller: BestSellerProduct {
                name: "Indomie Godog".to_string(),
                quantity_sold: 3,
            },
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_revenue"], 10_500);
        assert_eq!(json["best_seller"]["quantity_sold"], 3);
    }
}
