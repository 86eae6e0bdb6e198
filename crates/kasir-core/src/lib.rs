//! # kasir-core: Pure Business Logic for Kasir POS
//!
//! This crate holds the rules of a sale as pure functions with zero I/O
//! dependencies. The database layer feeds it product snapshots read inside a
//! locked unit of work and persists whatever it decides.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (apps/api)                          │   │
//! │  │    /api/products, /api/checkout, /api/report/today              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ price_line│  │   rules   │  │   │
//! │  │   │Transaction│  │ checked × │  │  tally    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-db (Database Layer)                    │   │
//! │  │        SQLite queries, migrations, checkout unit of work        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, SalesSummary, ...)
//! - [`money`] - Money type with checked integer arithmetic
//! - [`checkout`] - Per-line stock check and pricing, running totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::checkout::{price_line, CheckoutTally};
//! use kasir_core::types::StockSnapshot;
//!
//! let indomie = StockSnapshot {
//!     product_id: 1,
//!     name: "Indomie Godog".to_string(),
//!     price: 3500,
//!     stock: 10,
//! };
//!
//! let line = price_line(&indomie, 3).unwrap();
//! assert_eq!(line.subtotal, 10_500);
//!
//! let mut tally = CheckoutTally::default();
//! tally.push(line).unwrap();
//! assert_eq!(tally.total().minor(), 10_500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of lines allowed in a single checkout.
///
/// ## Business Reason
/// Every line becomes one row of a single bulk insert; the cap keeps that
/// statement well inside SQLite's bound-parameter limit.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum length of a product or category name.
pub const MAX_NAME_LEN: usize = 200;
