//! Shared service state.
//!
//! Cloned into each handler via Axum's State extractor. Holds the
//! configuration and the store handle; there is no other shared mutable
//! state in the process.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServiceConfig;
use crate::store::{MemoryStore, StockStore};

#[derive(Clone)]
pub struct ServiceState {
    pub config: Arc<ServiceConfig>,
    pub store: Arc<dyn StockStore>,
    /// Server start time.
    pub start_time: Instant,
}

impl ServiceState {
    pub fn new(config: ServiceConfig, store: Arc<dyn StockStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            start_time: Instant::now(),
        }
    }

    /// State over an empty in-process store with default config.
    pub fn in_memory() -> Self {
        Self::new(ServiceConfig::default(), Arc::new(MemoryStore::new()))
    }

    /// Get uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
