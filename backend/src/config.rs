//! Server configuration loaded from environment variables.
//!
//! Repository selection lives in [`crate::db::factory`]; this module covers
//! the bind address and pagination defaults.

use std::env;
use std::net::SocketAddr;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("invalid pagination settings: {0}")]
    Pagination(String),

    #[error("invalid bind address '{0}'")]
    Address(String),
}

/// Pagination defaults applied to list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Page size used when the caller omits `size` or sends a non-positive one
    pub default_size: u32,
    /// Upper bound for `size`; larger requests are clamped
    pub max_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_size: 20,
            max_size: 2000,
        }
    }
}

impl PaginationConfig {
    pub fn new(default_size: u32, max_size: u32) -> Result<Self, ConfigError> {
        if default_size == 0 {
            return Err(ConfigError::Pagination(
                "default page size must be positive".to_string(),
            ));
        }
        if max_size < default_size {
            return Err(ConfigError::Pagination(format!(
                "max page size {} is below default page size {}",
                max_size, default_size
            )));
        }
        Ok(Self {
            default_size,
            max_size,
        })
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub pagination: PaginationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            pagination: PaginationConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST`: Server host (default: 0.0.0.0)
    /// - `PORT`: Server port (default: 8080)
    /// - `PAGE_DEFAULT_SIZE`: Page size when none is requested (default: 20)
    /// - `PAGE_MAX_SIZE`: Largest page size served (default: 2000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = parse_var("PORT", "port number", defaults.port)?;
        let default_size = parse_var(
            "PAGE_DEFAULT_SIZE",
            "positive integer",
            defaults.pagination.default_size,
        )?;
        let max_size = parse_var(
            "PAGE_MAX_SIZE",
            "positive integer",
            defaults.pagination.max_size,
        )?;

        Ok(Self {
            host,
            port,
            pagination: PaginationConfig::new(default_size, max_size)?,
        })
    }

    /// Resolve the socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::Address(addr))
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name,
            expected,
            value,
        }),
        Err(_) => Ok(default),
    }
}
