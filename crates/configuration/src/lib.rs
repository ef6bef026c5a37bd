use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DatabaseSettings, LedgerTable, ServerSettings};

/// The configuration file looked up by `load_config`.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `ENERGY__DATABASE__URL`.
const ENV_PREFIX: &str = "ENERGY";

/// Loads the application configuration from the `config.toml` file.
///
/// The file is optional: built-in defaults apply first, then the file, then
/// any `ENERGY__*` environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Loads the configuration using `path` as the (optional) file source.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .set_default("database.url", "sqlite://./database/trades.sqlite")?
        .set_default("database.ledger_table", LedgerTable::default().name())?
        .set_default("database.max_connections", 5_i64)?
        .set_default("database.acquire_timeout_secs", 5_i64)?
        .set_default("database.read_only", true)?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8000_i64)?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        table = %config.database.ledger_table,
        url = %config.database.url,
        "Configuration loaded."
    );

    Ok(config)
}
