//! # Kasir API
//!
//! HTTP surface of the Kasir point-of-sale backend.
//!
//! ## Module Organization
//! ```text
//! kasir_api/
//! ├── lib.rs          ◄─── You are here (tracing setup, exports)
//! ├── config.rs       ◄─── ApiConfig (defaults → kasir.toml → KASIR_*)
//! ├── error.rs        ◄─── ApiError → { code, message } + status
//! ├── extract.rs      ◄─── AppJson / AppPath / AppQuery
//! ├── routes.rs       ◄─── build_router
//! ├── state.rs        ◄─── AppState (Database handle)
//! └── handlers/
//!     ├── health.rs
//!     ├── product.rs
//!     ├── category.rs
//!     ├── checkout.rs
//!     └── report.rs
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use crate::config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::build_router;
pub use state::AppState;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,kasir=debug,sqlx=warn")),
        )
        .with_target(true)
        .init();
}
