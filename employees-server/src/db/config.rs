//! Database configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DB_HOST`: server host (default: localhost)
//! - `DB_PORT`: server port (default: 5432)
//! - `DB_USER`: role name (default: postgres)
//! - `DB_PASSWORD`: password (default: empty)
//! - `DB_NAME`: database name (default: postgres)
//!
//! TLS is disabled, the service expects to sit next to its database.

use std::fmt;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_USER: &str = "postgres";
const DEFAULT_DATABASE: &str = "postgres";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid DB_PORT '{value}': expected a port number")]
    InvalidPort { value: String },
}

/// Connection settings for the relational backend
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DatabaseConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup (for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match get("DB_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: get("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            user: get("DB_USER").unwrap_or_else(|| DEFAULT_USER.to_string()),
            password: get("DB_PASSWORD").unwrap_or_default(),
            database: get("DB_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        })
    }

    /// Build sqlx connect options.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(PgSslMode::Disable)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = DatabaseConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DatabaseConfig::default());
        assert_eq!(config.port, 5432);
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn reads_all_variables() {
        let config = DatabaseConfig::from_lookup(lookup(&[
            ("DB_HOST", "db"),
            ("DB_PORT", "6543"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "staff"),
        ]))
        .unwrap();

        assert_eq!(config.host, "db");
        assert_eq!(config.port, 6543);
        assert_eq!(config.user, "app");
        assert_eq!(config.password, "secret");
        assert_eq!(config.database, "staff");
    }

    #[test]
    fn rejects_bad_port() {
        let err = DatabaseConfig::from_lookup(lookup(&[("DB_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value } if value == "http"));
    }

    #[test]
    fn empty_values_fall_back() {
        let config = DatabaseConfig::from_lookup(lookup(&[("DB_HOST", ""), ("DB_PORT", "")])).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
    }

    #[test]
    fn debug_hides_password() {
        let config = DatabaseConfig {
            password: "hunter2".into(),
            ..DatabaseConfig::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }
}
