//! # HTTP Handlers
//!
//! One module per resource. Handlers stay thin:
//!
//! ```text
//! extract (AppJson / AppPath / AppQuery)
//!      │
//!      ▼
//! validate (kasir_core::validation)
//!      │
//!      ▼
//! one repository call (kasir_db)
//!      │
//!      ▼
//! AppJson response or ApiError
//! ```

pub mod category;
pub mod checkout;
pub mod health;
pub mod product;
pub mod report;
