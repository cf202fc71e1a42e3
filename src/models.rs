//! Stock record types.
//!
//! `Stock` is the stored record and the API payload. `StockInput` is the
//! request body for create/update: `symbol` and `name` stay optional until
//! [`StockInput::validate`] checks them, everything else defaults to zero or
//! empty when omitted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Valuation metrics behind the Graham ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrahamProps {
    pub graham_score: f64,
    pub current_ratio: f64,
    pub debt_to_equity: f64,
    pub book_value: f64,
    /// Ascending, 1 = best.
    pub graham_rank: i64,
    pub eps: f64,
    pub intrinsic_value: f64,
}

/// Inputs to the magic formula ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagicFormulaProps {
    /// Return on assets.
    pub roa: f64,
    /// Ascending, 1 = best.
    pub magic_formula_rank: i64,
}

/// One record per ticker symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub pe: f64,
    #[serde(default, rename = "marketCap")]
    pub market_cap: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub graham_props: GrahamProps,
    #[serde(default)]
    pub magic_formula_props: MagicFormulaProps,
}

impl Stock {
    /// Create a record with the required fields and every other field at its default.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price: 0.0,
            pe: 0.0,
            market_cap: 0.0,
            description: String::new(),
            logo_url: String::new(),
            sector: String::new(),
            graham_props: GrahamProps::default(),
            magic_formula_props: MagicFormulaProps::default(),
        }
    }
}

/// Rejection produced by [`StockInput::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Path `{0}` is required.")]
    MissingField(&'static str),
}

/// POST/PUT body for a stock.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StockInput {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub price: f64,
    pub pe: f64,
    #[serde(rename = "marketCap")]
    pub market_cap: f64,
    pub description: String,
    pub logo_url: String,
    pub sector: String,
    pub graham_props: GrahamProps,
    pub magic_formula_props: MagicFormulaProps,
}

impl StockInput {
    /// Check required fields and produce the record to store.
    ///
    /// Blank strings count as missing. The symbol is kept exactly as
    /// submitted; handlers canonicalize it before storing.
    pub fn validate(self) -> Result<Stock, ValidationError> {
        let symbol = required(self.symbol, "symbol")?;
        let name = required(self.name, "name")?;

        Ok(Stock {
            symbol,
            name,
            price: self.price,
            pe: self.pe,
            market_cap: self.market_cap,
            description: self.description,
            logo_url: self.logo_url,
            sector: self.sector,
            graham_props: self.graham_props,
            magic_formula_props: self.magic_formula_props,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Canonical form of a symbol on lookup/mutation paths.
pub fn canonical_symbol(raw: &str) -> String {
    raw.to_uppercase()
}
