//! Datastore seam for the stock collection.
//!
//! Handlers talk to a [`StockStore`] trait object. Each method is one
//! single-document (or single-query) datastore call; uniqueness of `symbol`
//! is enforced by the backend, never by locking in the handler.
//!
//! # Backends
//!
//! - [`mongo::MongoStore`]: production backend on a MongoDB collection
//! - [`memory::MemoryStore`]: in-process backend with the same query semantics

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Stock;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Errors surfaced by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same symbol already exists.
    #[error("duplicate symbol: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("codec error: {0}")]
    Codec(String),
}

/// Stored ranking used by the "top" listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankField {
    MagicFormula,
    Graham,
}

impl RankField {
    /// Dotted document path of the rank field.
    pub fn path(self) -> &'static str {
        match self {
            RankField::MagicFormula => "magic_formula_props.magic_formula_rank",
            RankField::Graham => "graham_props.graham_rank",
        }
    }

    pub fn value(self, stock: &Stock) -> i64 {
        match self {
            RankField::MagicFormula => stock.magic_formula_props.magic_formula_rank,
            RankField::Graham => stock.graham_props.graham_rank,
        }
    }
}

/// Operations the service needs from the stock collection.
///
/// Symbol arguments are matched exactly and case-sensitively; callers
/// canonicalize beforehand where the route requires it. Text arguments to
/// [`search`](StockStore::search) and [`by_sector`](StockStore::by_sector)
/// are literal substrings matched case-insensitively.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Short backend name for health output and logs.
    fn backend_tag(&self) -> &'static str;

    /// Round-trip to the datastore.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Every record, or at most `limit` of them, in no defined order.
    async fn list(&self, limit: Option<usize>) -> Result<Vec<Stock>, StoreError>;

    /// Up to `limit` records sorted ascending by `rank`.
    async fn top_ranked(&self, rank: RankField, limit: usize) -> Result<Vec<Stock>, StoreError>;

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Stock>, StoreError>;

    /// Insert a new record. Fails with [`StoreError::Duplicate`] if the symbol is taken.
    async fn insert(&self, stock: Stock) -> Result<Stock, StoreError>;

    /// Replace the record stored under `symbol`, returning the new document,
    /// or `None` when nothing matched.
    async fn replace(&self, symbol: &str, stock: Stock) -> Result<Option<Stock>, StoreError>;

    /// Remove the record stored under `symbol`. Returns whether one was removed.
    async fn delete(&self, symbol: &str) -> Result<bool, StoreError>;

    /// Records whose symbol or name contains `text`, at most `limit`.
    async fn search(&self, text: &str, limit: usize) -> Result<Vec<Stock>, StoreError>;

    /// Records whose sector contains `text`.
    async fn by_sector(&self, text: &str) -> Result<Vec<Stock>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_field_paths() {
        assert_eq!(
            RankField::MagicFormula.path(),
            "magic_formula_props.magic_formula_rank"
        );
        assert_eq!(RankField::Graham.path(), "graham_props.graham_rank");
    }

    #[test]
    fn test_rank_field_value() {
        let mut stock = Stock::new("T", "AT&T");
        stock.graham_props.graham_rank = 7;
        stock.magic_formula_props.magic_formula_rank = 2;

        assert_eq!(RankField::Graham.value(&stock), 7);
        assert_eq!(RankField::MagicFormula.value(&stock), 2);
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Duplicate("AAPL".into());
        assert_eq!(err.to_string(), "duplicate symbol: AAPL");
    }
}
