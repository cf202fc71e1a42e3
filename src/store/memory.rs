//! In-process stock store.
//!
//! Mirrors the MongoDB backend's query semantics over a `Vec` kept in
//! insertion order. Used by the test suite and by `--in-memory` runs.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{RankField, StockStore, StoreError};
use crate::models::Stock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    stocks: RwLock<Vec<Stock>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `stocks`, in order. Later duplicates are dropped.
    pub fn with_stocks(stocks: impl IntoIterator<Item = Stock>) -> Self {
        let mut seeded: Vec<Stock> = Vec::new();
        for stock in stocks {
            if !seeded.iter().any(|s| s.symbol == stock.symbol) {
                seeded.push(stock);
            }
        }
        Self {
            stocks: RwLock::new(seeded),
        }
    }

    pub fn len(&self) -> usize {
        self.stocks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.read().is_empty()
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[async_trait]
impl StockStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<Stock>, StoreError> {
        let stocks = self.stocks.read();
        let take = limit.unwrap_or(stocks.len());
        Ok(stocks.iter().take(take).cloned().collect())
    }

    async fn top_ranked(&self, rank: RankField, limit: usize) -> Result<Vec<Stock>, StoreError> {
        let mut ranked = self.stocks.read().clone();
        ranked.sort_by_key(|s| rank.value(s));
        ranked.truncate(limit);
        Ok(ranked)
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Stock>, StoreError> {
        Ok(self
            .stocks
            .read()
            .iter()
            .find(|s| s.symbol == symbol)
            .cloned())
    }

    async fn insert(&self, stock: Stock) -> Result<Stock, StoreError> {
        let mut stocks = self.stocks.write();
        if stocks.iter().any(|s| s.symbol == stock.symbol) {
            return Err(StoreError::Duplicate(stock.symbol));
        }
        stocks.push(stock.clone());
        Ok(stock)
    }

    async fn replace(&self, symbol: &str, stock: Stock) -> Result<Option<Stock>, StoreError> {
        let mut stocks = self.stocks.write();
        let Some(index) = stocks.iter().position(|s| s.symbol == symbol) else {
            return Ok(None);
        };
        let collides = stocks
            .iter()
            .enumerate()
            .any(|(i, s)| i != index && s.symbol == stock.symbol);
        if collides {
            return Err(StoreError::Duplicate(stock.symbol));
        }
        stocks[index] = stock.clone();
        Ok(Some(stock))
    }

    async fn delete(&self, symbol: &str) -> Result<bool, StoreError> {
        let mut stocks = self.stocks.write();
        match stocks.iter().position(|s| s.symbol == symbol) {
            Some(index) => {
                stocks.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn search(&self, text: &str, limit: usize) -> Result<Vec<Stock>, StoreError> {
        let needle = text.to_lowercase();
        Ok(self
            .stocks
            .read()
            .iter()
            .filter(|s| {
                contains_ignore_case(&s.symbol, &needle) || contains_ignore_case(&s.name, &needle)
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn by_sector(&self, text: &str) -> Result<Vec<Stock>, StoreError> {
        let needle = text.to_lowercase();
        Ok(self
            .stocks
            .read()
            .iter()
            .filter(|s| contains_ignore_case(&s.sector, &needle))
            .cloned()
            .collect())
    }
}
