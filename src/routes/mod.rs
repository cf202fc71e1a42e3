//! Route handlers.
//!
//! - [`stocks`]: the `/api/stocks` directory endpoints
//! - [`health`]: liveness and readiness checks

pub mod health;
pub mod stocks;
