//! Configuration loading and management
//!
//! Configuration is resolved once at startup: defaults, then an optional YAML
//! file named by `PRODUCT_INVENTORY_CONFIG`, then the `DATABASE_URL`, `HOST`
//! and `PORT` environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Store used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite:///./products.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// Environment variable naming an optional YAML config file
pub const CONFIG_PATH_ENV: &str = "PRODUCT_INVENTORY_CONFIG";

/// Errors raised while resolving configuration at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value '{value}' for {key}: {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("failed to create store directory '{path}': {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convert a connection string into a native SQLite locator.
///
/// - `sqlite:///path/to.db` becomes `path/to.db`
/// - `file:products.db?mode=rwc` becomes `products.db`
/// - anything else is returned unchanged
pub fn sqlite_path_from_url(url: &str) -> &str {
    if let Some(path) = url.strip_prefix("sqlite:///") {
        return path;
    }
    if let Some(rest) = url.strip_prefix("file:") {
        return rest.split('?').next().unwrap_or(rest);
    }
    url
}

/// Store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Connection string, see [`sqlite_path_from_url`]
    pub database_url: String,

    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
        }
    }
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    /// Native locator derived from the connection string
    pub fn path(&self) -> &str {
        sqlite_path_from_url(&self.database_url)
    }

    pub fn is_in_memory(&self) -> bool {
        matches!(self.path(), ":memory:" | "sqlite::memory:")
    }

    /// Create the directory holding the store file if it does not exist
    pub fn ensure_parent_dir(&self) -> Result<(), ConfigError> {
        if self.is_in_memory() {
            return Ok(());
        }

        let Some(dir) = Path::new(self.path()).parent() else {
            return Ok(());
        };
        if dir.as_os_str().is_empty() || dir.exists() {
            return Ok(());
        }

        std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;
        tracing::info!(path = %dir.display(), "created store directory");
        Ok(())
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub store: StoreConfig,
    pub server: ServerConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Resolve the process configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `DATABASE_URL`, `HOST` and `PORT` from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.store.database_url = url;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: "PORT".to_string(),
                    value: port.clone(),
                    message: e.to_string(),
                }
            })?;
        }
        Ok(())
    }
}
