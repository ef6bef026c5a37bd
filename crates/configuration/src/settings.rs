use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
}

/// Where the trade ledger lives and how we connect to it.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite connection string (e.g., "sqlite://./database/trades.sqlite").
    pub url: String,
    /// The ledger table every metric is computed against.
    pub ledger_table: LedgerTable,
    /// Upper bound on pooled connections to the ledger.
    pub max_connections: u32,
    /// How long a query waits for a free connection before failing.
    pub acquire_timeout_secs: u64,
    /// Open the ledger read-only. The service never writes to it.
    pub read_only: bool,
}

/// The address the HTTP API binds to.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// The allow-list of ledger tables the service may query.
///
/// Table names cannot be bound as SQL parameters, so they are only ever taken
/// from this closed set and never from request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LedgerTable {
    /// EPEX intraday trades captured on 2012-12-20.
    #[default]
    #[serde(rename = "epex_12_20_12_13")]
    #[cfg_attr(feature = "clap", value(name = "epex_12_20_12_13"))]
    Epex12201213,
}

impl LedgerTable {
    /// The bare table name.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerTable::Epex12201213 => "epex_12_20_12_13",
        }
    }

    /// The table name quoted as an SQL identifier, ready to splice into a query.
    pub fn sql_identifier(&self) -> &'static str {
        match self {
            LedgerTable::Epex12201213 => "\"epex_12_20_12_13\"",
        }
    }
}

impl fmt::Display for LedgerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.url must not be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
