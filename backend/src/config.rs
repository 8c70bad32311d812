//! Server configuration from command-line flags and environment variables.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ledger-server", version, about = "Personal bookkeeping REST backend")]
pub struct Config {
    /// SQLite connection string; the file is created if missing
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:ledger.db")]
    pub database_url: String,

    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Single allowed CORS origin; any origin is allowed when unset
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config::parse_from(["ledger-server", "--host", "127.0.0.1", "--port", "8080"]);
        assert_eq!(config.bind_address().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_flags_override() {
        let config = Config::parse_from([
            "ledger-server",
            "--database-url",
            "sqlite::memory:",
            "--port",
            "9000",
            "--cors-origin",
            "http://localhost:3000",
        ]);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.port, 9000);
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_bad_host_rejected() {
        let config = Config::parse_from(["ledger-server", "--host", "not a host"]);
        assert!(config.bind_address().is_err());
    }
}
