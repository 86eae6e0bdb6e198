//! Router assembly.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{category, checkout, health, product, report};
use crate::state::AppState;

/// Builds the full application router.
///
/// ```text
/// /health
/// /api
///   ├── /products            GET, POST
///   ├── /products/:id        GET, PUT, DELETE
///   ├── /categories          GET, POST
///   ├── /categories/:id      GET, PUT, DELETE
///   ├── /checkout            POST
///   ├── /transactions/:id    GET
///   ├── /report              GET ?start_date&end_date
///   └── /report/today        GET
/// ```
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/products",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/products/:id",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route(
            "/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/categories/:id",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        .route("/checkout", post(checkout::checkout))
        .route("/transactions/:id", get(checkout::get_transaction))
        .route("/report", get(report::between))
        .route("/report/today", get(report::today));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
