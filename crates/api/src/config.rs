use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal (default: `5`).
    pub shutdown_timeout_secs: u64,
    /// Directory served for non-API paths (default: `public`).
    pub static_dir: String,
    /// Database connection settings.
    pub database: DatabaseConfig,
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `SERVER_HOST`          | `0.0.0.0`                  |
    /// | `SERVER_PORT`          | `8080`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:8080`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `5`                        |
    /// | `STATIC_DIR`           | `public`                   |
    ///
    /// See [`DatabaseConfig::from_lookup`] for the `DB_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "SERVER_PORT", 8080, "u16")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:8080".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30, "u64")?;
        let shutdown_timeout_secs = parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 5, "u64")?;
        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| "public".into());
        let database = DatabaseConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            static_dir,
            database,
        })
    }
}

impl DatabaseConfig {
    /// | Env Var              | Default        |
    /// |----------------------|----------------|
    /// | `DB_HOST`            | `localhost`    |
    /// | `DB_PORT`            | `5432`         |
    /// | `DB_USER`            | `postgres`     |
    /// | `DB_PASSWORD`        | `postgres`     |
    /// | `DB_NAME`            | `book_library` |
    /// | `DB_SSLMODE`         | `disable`      |
    /// | `DB_MAX_CONNECTIONS` | `20`           |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".into());
        let port = parse_or(&lookup, "DB_PORT", 5432, "u16")?;
        let user = lookup("DB_USER").unwrap_or_else(|| "postgres".into());
        let password = lookup("DB_PASSWORD").unwrap_or_else(|| "postgres".into());
        let name = lookup("DB_NAME").unwrap_or_else(|| "book_library".into());
        let ssl_mode = parse_or(&lookup, "DB_SSLMODE", PgSslMode::Disable, "SSL mode")?;
        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 20, "u32")?;

        Ok(Self {
            host,
            port,
            user,
            password,
            name,
            ssl_mode,
            max_connections,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(self.ssl_mode)
    }

    /// `user@host:port/name`, safe to log.
    pub fn display_target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name)
    }
}

fn parse_or<T: FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.shutdown_timeout_secs, 5);
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.name, "book_library");
        assert_matches!(config.database.ssl_mode, PgSslMode::Disable);
        assert_eq!(
            config.database.display_target(),
            "postgres@localhost:5432/book_library"
        );
    }

    #[test]
    fn overrides_are_applied() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("SERVER_PORT", "9090"),
            ("DB_HOST", "db.internal"),
            ("DB_SSLMODE", "require"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.database.host, "db.internal");
        assert_matches!(config.database.ssl_mode, PgSslMode::Require);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn invalid_values_are_errors() {
        let err = ServerConfig::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { key: "SERVER_PORT", .. });

        let err = ServerConfig::from_lookup(lookup_from(&[("DB_SSLMODE", "sometimes")])).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { key: "DB_SSLMODE", .. });
    }
}
