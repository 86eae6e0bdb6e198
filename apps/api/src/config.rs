//! API server configuration.
//!
//! Layered with the `config` crate, later sources win:
//!
//! ```text
//! built-in defaults
//!      │
//!      ▼
//! kasir.toml (optional, working directory)
//!      │
//!      ▼
//! KASIR_* environment variables
//!   KASIR_HOST, KASIR_PORT, KASIR_DATABASE_PATH,
//!   KASIR_MAX_CONNECTIONS, KASIR_MIN_CONNECTIONS, KASIR_BUSY_TIMEOUT_SECS
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use kasir_db::DbConfig;
use serde::{Deserialize, Serialize};

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind.
    pub host: String,

    /// HTTP port.
    pub port: u16,

    /// SQLite database file.
    pub database_path: PathBuf,

    /// Pool upper bound.
    pub max_connections: u32,

    /// Connections kept open while idle.
    pub min_connections: u32,

    /// Seconds a checkout waits for the database write lock.
    pub busy_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_path: PathBuf::from("kasir.db"),
            max_connections: 25,
            min_connections: 5,
            busy_timeout_secs: 5,
        }
    }
}

impl ApiConfig {
    /// Loads defaults, then `kasir.toml` if present, then `KASIR_*` env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name("kasir").required(false))
    }

    /// Like [`load`](Self::load) but with an explicit, required config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build<F>(file: F) -> Result<Self, ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let defaults = ApiConfig::default();

        let settings = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_path", defaults.database_path.display().to_string())?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .set_default("min_connections", i64::from(defaults.min_connections))?
            .set_default("busy_timeout_secs", defaults.busy_timeout_secs as i64)?
            .add_source(file)
            .add_source(Environment::with_prefix("KASIR").try_parsing(true))
            .build()?;

        let config: ApiConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects combinations the pool can't honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::InvalidValue("min_connections".to_string()));
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("database_path".to_string()));
        }
        Ok(())
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("host".to_string()))
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .busy_timeout(Duration::from_secs(self.busy_timeout_secs))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kasir.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "port = 9090").unwrap();
        writeln!(file, "database_path = \"/tmp/kasir-test.db\"").unwrap();
        writeln!(file, "min_connections = 1").unwrap();

        let config = ApiConfig::load_from(&path).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.database_path, PathBuf::from("/tmp/kasir-test.db"));
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_pool_bounds_rejected() {
        let config = ApiConfig {
            min_connections: 30,
            ..ApiConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(field)) if field == "min_connections"
        ));
    }

    #[test]
    fn test_db_config_carries_pool_settings() {
        let config = ApiConfig {
            max_connections: 8,
            min_connections: 2,
            busy_timeout_secs: 3,
            ..ApiConfig::default()
        };
        let db = config.db_config();
        assert_eq!(db.max_connections, 8);
        assert_eq!(db.min_connections, 2);
        assert_eq!(db.busy_timeout, Duration::from_secs(3));
    }
}
