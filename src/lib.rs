//! Stock directory service: Axum HTTP/JSON API over a MongoDB collection of
//! stock reference records.
//!
//! Each request maps to a single datastore operation. Responses share one
//! envelope shape, `{success, data?, count?, error?}`.
//!
//! # Modules
//!
//! - [`app`]: Axum application builder and router setup
//! - [`config`]: Listen address and datastore settings
//! - [`state`]: Shared service state (config, store handle)
//! - [`error`]: Unified error handling with HTTP status codes
//! - [`envelope`]: Response envelope
//! - [`models`]: Stock record and request body types
//! - [`routes`]: HTTP route handlers (stocks, health)
//! - [`store`]: Datastore trait with MongoDB and in-memory backends

pub mod app;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

// Re-exports for convenience
pub use app::create_app;
pub use config::ServiceConfig;
pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};
pub use models::{GrahamProps, MagicFormulaProps, Stock, StockInput, ValidationError};
pub use state::ServiceState;
pub use store::{MemoryStore, MongoStore, RankField, StockStore, StoreError};
