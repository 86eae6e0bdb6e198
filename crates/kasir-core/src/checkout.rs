//! # Checkout Rules
//!
//! The pure half of a checkout. The database layer opens the write-locked
//! unit, reads each product, and hands the snapshot here; this module decides
//! whether the line is sellable and what it costs.
//!
//! ## Flow
//! ```text
//! validate_cart(items)                 before any storage access
//!        │
//!        ▼
//! for each item, in caller order:
//!   read snapshot (kasir-db, locked) ──► price_line(snapshot, qty)
//!        │                                 ├── stock < qty  → InsufficientStock
//!        │                                 └── price × qty  → PricedLine
//!        ▼
//!   tally.push(line)                       running total, checked
//!        │
//!        ▼
//! tally.total() → Transaction.total_amount
//! tally.lines() → TransactionDetail rows
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CheckoutItem, StockSnapshot};
use crate::validation::validate_quantity;
use crate::MAX_CART_ITEMS;

// =============================================================================
// Priced Line
// =============================================================================

/// A cart line that passed the stock check, priced at the current unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub subtotal: i64,
}

/// Rejects carts that can never succeed, without touching storage.
///
/// ## Rules
/// - at least one line
/// - at most [`MAX_CART_ITEMS`] lines
/// - every quantity > 0
pub fn validate_cart(items: &[CheckoutItem]) -> CoreResult<()> {
    if items.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    if items.len() > MAX_CART_ITEMS {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        });
    }

    for item in items {
        validate_quantity(item.quantity)?;
    }

    Ok(())
}

/// Checks stock and prices one line.
///
/// ## Arguments
/// * `snapshot` - Product row read inside the checkout unit
/// * `quantity` - Requested units (already validated > 0)
///
/// ## Returns
/// * `Ok(PricedLine)` - `subtotal = price × quantity`
/// * `Err(InsufficientStock)` - `stock < quantity`
/// * `Err(AmountOverflow)` - the multiplication left the `i64` range
pub fn price_line(snapshot: &StockSnapshot, quantity: i64) -> CoreResult<PricedLine> {
    if snapshot.stock < quantity {
        return Err(CoreError::InsufficientStock {
            product_id: snapshot.product_id,
            requested: quantity,
            available: snapshot.stock,
        });
    }

    let subtotal = Money::from_minor(snapshot.price)
        .checked_mul_quantity(quantity)
        .ok_or(CoreError::AmountOverflow {
            product_id: snapshot.product_id,
        })?;

    Ok(PricedLine {
        product_id: snapshot.product_id,
        product_name: snapshot.name.clone(),
        quantity,
        subtotal: subtotal.minor(),
    })
}

// =============================================================================
// Tally
// =============================================================================

/// Accumulates priced lines and their running total.
#[derive(Debug, Clone, Default)]
pub struct CheckoutTally {
    lines: Vec<PricedLine>,
    total: Money,
}

impl CheckoutTally {
    /// Creates a tally sized for `capacity` lines.
    pub fn with_capacity(capacity: usize) -> Self {
        CheckoutTally {
            lines: Vec::with_capacity(capacity),
            total: Money::zero(),
        }
    }

    /// Adds a line to the tally. Fails if the total would overflow.
    pub fn push(&mut self, line: PricedLine) -> CoreResult<()> {
        self.total = self
            .total
            .checked_add(Money::from_minor(line.subtotal))
            .ok_or(CoreError::AmountOverflow {
                product_id: line.product_id,
            })?;
        self.lines.push(line);
        Ok(())
    }

    /// Sum of all pushed subtotals.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn lines(&self) -> &[PricedLine] {
        &self.lines
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(product_id: i64, price: i64, stock: i64) -> StockSnapshot {
        StockSnapshot {
            product_id,
            name: format!("Product {}", product_id),
            price,
            stock,
        }
    }

    #[test]
    fn test_price_line_computes_subtotal() {
        let line = price_line(&snapshot(1, 3500, 10), 3).unwrap();
        assert_eq!(line.product_id, 1);
        assert_eq!(line.quantity, 3);
        assert_eq!(line.subtotal, 10_500);
        assert_eq!(line.product_name, "Product 1");
    }

    #[test]
    fn test_price_line_allows_exact_stock() {
        let line = price_line(&snapshot(1, 3000, 4), 4).unwrap();
        assert_eq!(line.subtotal, 12_000);
    }

    #[test]
    fn test_price_line_rejects_insufficient_stock() {
        let err = price_line(&snapshot(1, 3500, 2), 5).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                product_id: 1,
                requested: 5,
                available: 2
            }
        );
    }

    #[test]
    fn test_price_line_rejects_overflow() {
        let err = price_line(&snapshot(7, i64::MAX, i64::MAX), 2).unwrap_err();
        assert_eq!(err, CoreError::AmountOverflow { product_id: 7 });
    }

    #[test]
    fn test_tally_sums_subtotals() {
        let mut tally = CheckoutTally::with_capacity(2);
        tally.push(price_line(&snapshot(1, 3500, 10), 3).unwrap()).unwrap();
        tally.push(price_line(&snapshot(3, 13_000, 20), 2).unwrap()).unwrap();

        assert_eq!(tally.total().minor(), 36_500);
        let sum: i64 = tally.lines().iter().map(|l| l.subtotal).sum();
        assert_eq!(sum, tally.total().minor());
        assert_eq!(tally.lines().len(), 2);
    }

    #[test]
    fn test_tally_rejects_total_overflow() {
        let mut tally = CheckoutTally::default();
        tally.push(price_line(&snapshot(1, i64::MAX, 1), 1).unwrap()).unwrap();
        let err = tally
            .push(price_line(&snapshot(2, 1, 1), 1).unwrap())
            .unwrap_err();
        assert_eq!(err, CoreError::AmountOverflow { product_id: 2 });
    }

    #[test]
    fn test_validate_cart() {
        assert_eq!(validate_cart(&[]), Err(CoreError::EmptyCart));
        assert!(validate_cart(&[CheckoutItem::new(1, 1)]).is_ok());
        assert!(matches!(
            validate_cart(&[CheckoutItem::new(1, 0)]),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            validate_cart(&[CheckoutItem::new(1, -2)]),
            Err(CoreError::Validation(_))
        ));

        let too_many = vec![CheckoutItem::new(1, 1); MAX_CART_ITEMS + 1];
        assert_eq!(
            validate_cart(&too_many),
            Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS
            })
        );
    }
}
