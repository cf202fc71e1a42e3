//! Service configuration.
//!
//! Built once in `main` from CLI flags (with environment fallbacks) and
//! handed to [`ServiceState`](crate::state::ServiceState). Nothing reads the
//! environment after startup.

use clap::Args;

/// Listen address and datastore settings.
#[derive(Debug, Clone, Args)]
pub struct ServiceConfig {
    /// Host to bind to
    #[arg(long, env = "STOCKS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// MongoDB connection string
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://localhost:27017")]
    pub mongo_uri: String,

    /// Database holding the stock collection
    #[arg(long, env = "MONGO_DB", default_value = "stocks")]
    pub database: String,

    /// Collection name
    #[arg(long, env = "MONGO_COLLECTION", default_value = "stocks")]
    pub collection: String,

    /// Serve from an in-process store instead of MongoDB
    #[arg(long, env = "STOCKS_IN_MEMORY")]
    pub in_memory: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            mongo_uri: "mongodb://localhost:27017".into(),
            database: "stocks".into(),
            collection: "stocks".into(),
            in_memory: false,
        }
    }
}

impl ServiceConfig {
    /// Get bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        config: ServiceConfig,
    }

    #[test]
    fn test_default_bind_addr() {
        let config = ServiceConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "stock-directory",
            "--port",
            "8080",
            "--database",
            "market",
            "--in-memory",
        ]);

        assert_eq!(cli.config.port, 8080);
        assert_eq!(cli.config.database, "market");
        assert!(cli.config.in_memory);
        assert_eq!(cli.config.collection, "stocks");
    }
}
