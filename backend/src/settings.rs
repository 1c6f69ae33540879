//! Service settings loaded via OrthoConfig.
//!
//! Values come from `RESERVATIONS_*` environment variables and command-line
//! flags. The database URL additionally falls back to the conventional
//! `DATABASE_URL`; when neither is present the service runs on the in-memory
//! store.

use std::net::SocketAddr;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::TransactionMode;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address is not a valid socket address.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        /// Raw configured value.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// The pool must allow at least one connection.
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
}

/// Top-level configuration for the reservation service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RESERVATIONS")]
pub struct ServiceSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Wrap bulk inserts in a single transaction; enabled when unset.
    pub transactional: Option<bool>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServiceSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] for malformed addresses.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Configured database URL, else `DATABASE_URL` from `env`.
    ///
    /// Blank values count as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockable::MockEnv;
    /// use reservation_service::settings::ServiceSettings;
    ///
    /// let settings = ServiceSettings {
    ///     bind_addr: None,
    ///     database_url: None,
    ///     transactional: None,
    ///     db_max_connections: None,
    /// };
    /// let mut env = MockEnv::new();
    /// env.expect_string()
    ///     .returning(|_| Some("postgres://localhost/reservations".to_owned()));
    ///
    /// assert_eq!(
    ///     settings.database_url_from(&env).as_deref(),
    ///     Some("postgres://localhost/reservations")
    /// );
    /// ```
    pub fn database_url_from<E: Env>(&self, env: &E) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| env.string(DATABASE_URL_ENV))
            .filter(|url| !url.trim().is_empty())
    }

    /// Transaction mode for bulk inserts, transactional unless disabled.
    pub fn transaction_mode(&self) -> TransactionMode {
        if self.transactional.unwrap_or(true) {
            TransactionMode::Transactional
        } else {
            TransactionMode::AutoCommit
        }
    }

    /// Maximum pool size, defaulting to 10.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroConnections`] when configured as zero.
    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS) {
            0 => Err(SettingsError::ZeroConnections),
            size => Ok(size),
        }
    }
}
