//! Axum application builder.
//!
//! Static segments (`limit`, `top-*`, `search`, `sector`) are matched ahead
//! of the `{symbol}` capture, so a stock can never shadow them.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{health, stocks};
use crate::state::ServiceState;

/// Create the Axum application with all routes.
pub fn create_app(state: ServiceState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .route(
            "/api/stocks",
            get(stocks::list_stocks).post(stocks::create_stock),
        )
        .route("/api/stocks/limit/{limit}", get(stocks::list_stocks_limited))
        .route(
            "/api/stocks/top-magic-formula",
            get(stocks::top_magic_formula),
        )
        .route("/api/stocks/top-graham", get(stocks::top_graham))
        .route("/api/stocks/search", post(stocks::search_stocks))
        .route(
            "/api/stocks/sector/{sector_name}",
            get(stocks::stocks_by_sector),
        )
        .route(
            "/api/stocks/{symbol}",
            get(stocks::get_stock)
                .put(stocks::update_stock)
                .delete(stocks::delete_stock),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
