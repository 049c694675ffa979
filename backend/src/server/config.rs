//! Server settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Listener and database settings.
///
/// Layered from CLI flags, `DIET_*` environment variables, and an optional
/// configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIET")]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            database_url: None,
            pool_max_size: None,
            pool_connection_timeout_secs: None,
        }
    }
}

impl ServerSettings {
    /// Socket address assembled from `host` and `port`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when the host is not an IP address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.port;
        format!("{host}:{port}").parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {host}:{port}: {err}"),
            )
        })
    }

    /// Database URL, which must be configured.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when `DIET_DATABASE_URL` is unset.
    pub fn database_url(&self) -> std::io::Result<&str> {
        self.database_url.as_deref().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "DIET_DATABASE_URL must be set",
            )
        })
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn pool_connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.pool_connection_timeout_secs
                .unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
        )
    }
}
