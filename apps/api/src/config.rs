//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! A `.env` file in the working directory is read first by `main`.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Permissive CORS for the browser front-end
    pub cors_allow_any: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/cotiza.db".to_string())
                .into(),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            cors_allow_any: env::var("CORS_ALLOW_ANY")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CORS_ALLOW_ANY".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HOST".to_string()))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> ApiConfig {
        ApiConfig {
            host: host.to_string(),
            port: 4000,
            database_path: PathBuf::from("./data/cotiza.db"),
            db_max_connections: 5,
            cors_allow_any: true,
        }
    }

    #[test]
    fn test_bind_addr() {
        let addr = config("127.0.0.1").bind_addr().unwrap();
        assert_eq!(addr.port(), 4000);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_bind_addr_rejects_hostname() {
        let err = config("not an address").bind_addr().unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for HOST");
    }
}
