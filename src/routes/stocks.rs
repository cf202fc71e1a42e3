//! Stock directory endpoints.
//!
//! # Endpoints
//!
//! - `GET /api/stocks` - Every record
//! - `GET /api/stocks/limit/{limit}` - Up to `limit` records
//! - `GET /api/stocks/top-magic-formula?limit=N` - Best magic formula ranks first
//! - `GET /api/stocks/top-graham?limit=N` - Best Graham ranks first
//! - `GET /api/stocks/{symbol}` - One record by symbol
//! - `POST /api/stocks` - Create
//! - `PUT /api/stocks/{symbol}` - Replace
//! - `DELETE /api/stocks/{symbol}` - Delete
//! - `POST /api/stocks/search` - Symbol/name substring search
//! - `GET /api/stocks/sector/{sectorName}` - Sector substring filter
//!
//! Each handler performs exactly one store call (create does a lookup first
//! to report duplicates). Symbol path parameters are uppercased before
//! lookup, and stored symbols are uppercased on create and update; listing
//! and search inputs are passed through as given.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult};
use crate::models::{Stock, StockInput, canonical_symbol};
use crate::state::ServiceState;
use crate::store::RankField;

/// Limit used when none is given or it does not parse.
pub const DEFAULT_LIMIT: usize = 500;

/// Maximum number of search hits returned.
pub const SEARCH_RESULT_CAP: usize = 20;

type StockList = Json<Envelope<Vec<Stock>>>;

/// Parse a limit parameter, falling back to [`DEFAULT_LIMIT`].
///
/// Zero is treated like an invalid value.
pub fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_LIMIT)
}

/// Query parameters for the ranked listings.
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    /// Kept as text so a non-numeric value falls back instead of rejecting.
    pub limit: Option<String>,
}

/// POST /api/stocks/search body.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// List all stocks: `GET /api/stocks`
pub async fn list_stocks(State(state): State<ServiceState>) -> ApiResult<StockList> {
    let stocks = state.store.list(None).await?;
    Ok(Json(Envelope::list(stocks)))
}

/// List with limit: `GET /api/stocks/limit/{limit}`
pub async fn list_stocks_limited(
    State(state): State<ServiceState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StockList> {
    let Path(limit) = path?;
    let limit = parse_limit(Some(&limit));
    let stocks = state.store.list(Some(limit)).await?;
    Ok(Json(Envelope::list(stocks)))
}

/// `GET /api/stocks/top-magic-formula?limit=N`
pub async fn top_magic_formula(
    State(state): State<ServiceState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<StockList> {
    top_ranked(&state, RankField::MagicFormula, query).await
}

/// `GET /api/stocks/top-graham?limit=N`
pub async fn top_graham(
    State(state): State<ServiceState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<StockList> {
    top_ranked(&state, RankField::Graham, query).await
}

// An undecodable query string is treated like a missing limit.
async fn top_ranked(
    state: &ServiceState,
    rank: RankField,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<StockList> {
    let raw = query.ok().and_then(|Query(q)| q.limit);
    let limit = parse_limit(raw.as_deref());
    let stocks = state.store.top_ranked(rank, limit).await?;
    Ok(Json(Envelope::list(stocks)))
}

/// Get by symbol: `GET /api/stocks/{symbol}`
pub async fn get_stock(
    State(state): State<ServiceState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Envelope<Stock>>> {
    let Path(symbol) = path?;
    let symbol = canonical_symbol(&symbol);
    let stock = state
        .store
        .find_by_symbol(&symbol)
        .await?
        .ok_or_else(ApiError::stock_not_found)?;
    Ok(Json(Envelope::data(stock)))
}

/// Create: `POST /api/stocks`
///
/// The duplicate check uses the symbol exactly as submitted; the record is
/// stored under the uppercased symbol, so a clash on that key is also
/// reported as a duplicate.
pub async fn create_stock(
    State(state): State<ServiceState>,
    payload: Result<Json<StockInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Stock>>)> {
    let Json(input) = payload?;
    let mut stock = input.validate()?;

    if state.store.find_by_symbol(&stock.symbol).await?.is_some() {
        return Err(ApiError::BadRequest("Stock already exists".into()));
    }

    stock.symbol = canonical_symbol(&stock.symbol);
    let created = state.store.insert(stock).await?;
    tracing::info!(symbol = %created.symbol, "stock created");
    Ok((StatusCode::CREATED, Json(Envelope::data(created))))
}

/// Replace: `PUT /api/stocks/{symbol}`
pub async fn update_stock(
    State(state): State<ServiceState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<StockInput>, JsonRejection>,
) -> ApiResult<Json<Envelope<Stock>>> {
    let Path(symbol) = path?;
    let symbol = canonical_symbol(&symbol);
    let Json(input) = payload?;
    let mut stock = input.validate()?;
    stock.symbol = canonical_symbol(&stock.symbol);

    let updated = state
        .store
        .replace(&symbol, stock)
        .await?
        .ok_or_else(ApiError::stock_not_found)?;
    tracing::info!(symbol = %symbol, "stock updated");
    Ok(Json(Envelope::data(updated)))
}

/// Delete: `DELETE /api/stocks/{symbol}`
pub async fn delete_stock(
    State(state): State<ServiceState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Envelope<Value>>> {
    let Path(symbol) = path?;
    let symbol = canonical_symbol(&symbol);
    if !state.store.delete(&symbol).await? {
        return Err(ApiError::stock_not_found());
    }
    tracing::info!(symbol = %symbol, "stock deleted");
    Ok(Json(Envelope::data(json!({}))))
}

/// Search: `POST /api/stocks/search`
///
/// Whitespace only counts for the emptiness check; the query is matched as sent.
pub async fn search_stocks(
    State(state): State<ServiceState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<StockList> {
    let Json(req) = payload?;
    let query = req.query.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(ApiError::BadRequest("Search query is required".into()));
    }

    let stocks = state.store.search(&query, SEARCH_RESULT_CAP).await?;
    Ok(Json(Envelope::list(stocks)))
}

/// Filter by sector: `GET /api/stocks/sector/{sectorName}`
pub async fn stocks_by_sector(
    State(state): State<ServiceState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StockList> {
    let Path(sector) = path?;
    let stocks = state.store.by_sector(&sector).await?;
    Ok(Json(Envelope::list(stocks)))
}
