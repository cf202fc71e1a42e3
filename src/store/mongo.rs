//! MongoDB-backed stock store.
//!
//! One collection of [`Stock`] documents with a unique index on `symbol`.
//! Substring matching goes through `$regex` with the user text escaped, so
//! the match stays literal.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};

use super::{RankField, StockStore, StoreError};
use crate::config::ServiceConfig;
use crate::models::Stock;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

pub struct MongoStore {
    database: Database,
    collection: Collection<Stock>,
}

impl MongoStore {
    /// Build a client for the configured URI.
    ///
    /// The driver connects lazily, so an unreachable server does not fail
    /// here; only a malformed URI does.
    pub async fn connect(config: &ServiceConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.mongo_uri).await?;
        let database = client.database(&config.database);
        let collection = database.collection::<Stock>(&config.collection);
        Ok(Self {
            database,
            collection,
        })
    }

    /// Create the unique `symbol` index if it is missing.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "symbol": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn find_many(
        &self,
        filter: Document,
        sort: Option<Document>,
        limit: Option<usize>,
    ) -> Result<Vec<Stock>, StoreError> {
        let mut find = self.collection.find(filter);
        if let Some(sort) = sort {
            find = find.sort(sort);
        }
        if let Some(limit) = limit {
            let limit = i64::try_from(limit).map_err(|e| StoreError::Codec(e.to_string()))?;
            find = find.limit(limit);
        }
        let cursor = find.await?;
        Ok(cursor.try_collect().await?)
    }
}

/// Case-insensitive literal substring filter on `field`.
fn contains_filter(field: &str, text: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(
        field,
        doc! { "$regex": regex::escape(text), "$options": "i" },
    );
    filter
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn map_write_error(err: mongodb::error::Error, symbol: &str) -> StoreError {
    if is_duplicate_key(&err) {
        StoreError::Duplicate(symbol.to_string())
    } else {
        StoreError::Database(err)
    }
}

#[async_trait]
impl StockStore for MongoStore {
    fn backend_tag(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<Stock>, StoreError> {
        self.find_many(doc! {}, None, limit).await
    }

    async fn top_ranked(&self, rank: RankField, limit: usize) -> Result<Vec<Stock>, StoreError> {
        let mut sort = Document::new();
        sort.insert(rank.path(), 1);
        self.find_many(doc! {}, Some(sort), Some(limit)).await
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<Stock>, StoreError> {
        Ok(self.collection.find_one(doc! { "symbol": symbol }).await?)
    }

    async fn insert(&self, stock: Stock) -> Result<Stock, StoreError> {
        self.collection
            .insert_one(&stock)
            .await
            .map_err(|e| map_write_error(e, &stock.symbol))?;
        Ok(stock)
    }

    async fn replace(&self, symbol: &str, stock: Stock) -> Result<Option<Stock>, StoreError> {
        self.collection
            .find_one_and_replace(doc! { "symbol": symbol }, &stock)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_write_error(e, &stock.symbol))
    }

    async fn delete(&self, symbol: &str) -> Result<bool, StoreError> {
        let result = self.collection.delete_one(doc! { "symbol": symbol }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn search(&self, text: &str, limit: usize) -> Result<Vec<Stock>, StoreError> {
        let mut filter = Document::new();
        filter.insert(
            "$or",
            vec![contains_filter("symbol", text), contains_filter("name", text)],
        );
        self.find_many(filter, None, Some(limit)).await
    }

    async fn by_sector(&self, text: &str) -> Result<Vec<Stock>, StoreError> {
        self.find_many(contains_filter("sector", text), None, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::from_document;
    use mongodb::error::{CommandError, Error, WriteError};

    fn write_error(code: i32) -> Error {
        let inner: WriteError =
            from_document(doc! { "code": code, "errmsg": "write failed" }).unwrap();
        Error::from(ErrorKind::Write(WriteFailure::WriteError(inner)))
    }

    fn command_error(code: i32) -> Error {
        let inner: CommandError = from_document(
            doc! { "code": code, "codeName": "DuplicateKey", "errmsg": "E11000 duplicate key" },
        )
        .unwrap();
        Error::from(ErrorKind::Command(inner))
    }

    #[test]
    fn test_insert_duplicate_key_maps_to_duplicate() {
        let err = map_write_error(write_error(DUPLICATE_KEY), "AAPL");
        assert!(matches!(err, StoreError::Duplicate(s) if s == "AAPL"));
    }

    #[test]
    fn test_replace_duplicate_key_maps_to_duplicate() {
        let err = map_write_error(command_error(DUPLICATE_KEY), "MSFT");
        assert!(matches!(err, StoreError::Duplicate(s) if s == "MSFT"));
    }

    #[test]
    fn test_other_write_errors_stay_database_errors() {
        // 121: document failed validation
        let err = map_write_error(write_error(121), "AAPL");
        assert!(matches!(err, StoreError::Database(_)));

        let err = map_write_error(command_error(13), "AAPL");
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_contains_filter_escapes_metacharacters() {
        let filter = contains_filter("name", "A.B (C)");
        let regex = filter.get_document("name").unwrap();

        assert_eq!(regex.get_str("$regex").unwrap(), r"A\.B \(C\)");
        assert_eq!(regex.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_plain_text_filter_unchanged() {
        let filter = contains_filter("sector", "tech");
        assert_eq!(
            filter.get_document("sector").unwrap().get_str("$regex").unwrap(),
            "tech"
        );
    }
}
