//! Service configuration
//!
//! Every setting can be given as a flag or through the environment; the
//! defaults match a docker-compose deployment with a `db` MariaDB service.

use clap::Parser;
use sqlx::mysql::MySqlConnectOptions;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::db::{DatabaseConnection, DbResult};
use crate::startup::ReadinessPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Configuration for the items API server
#[derive(Debug, Clone, Parser)]
#[command(name = "items-api", version, about = "JSON CRUD API over the items table")]
pub struct ApiConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Full connection string; overrides the DB_* parts when set
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "DB_HOST", default_value = "db")]
    pub db_host: String,

    #[arg(long, env = "DB_PORT", default_value_t = 3306)]
    pub db_port: u16,

    #[arg(long, env = "DB_USER", default_value = "dbuser")]
    pub db_user: String,

    #[arg(long, env = "DB_PASSWORD", default_value = "dbpassword", hide_env_values = true)]
    pub db_password: String,

    #[arg(long, env = "DB_NAME", default_value = "mydatabase")]
    pub db_name: String,

    /// Upper bound on pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub db_max_connections: u32,

    /// Connection probes before startup gives up
    #[arg(long, env = "DB_CONNECT_ATTEMPTS", default_value_t = 10)]
    pub db_connect_attempts: u32,

    /// Pause between connection probes, in milliseconds
    #[arg(long, env = "DB_CONNECT_DELAY_MS", default_value_t = 5000)]
    pub db_connect_delay_ms: u64,
}

impl ApiConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_max_connections == 0 {
            return Err(ConfigError::InvalidConfig(
                "db_max_connections must be greater than 0".to_string(),
            ));
        }

        if self.db_connect_attempts == 0 {
            return Err(ConfigError::InvalidConfig(
                "db_connect_attempts must be greater than 0".to_string(),
            ));
        }

        if let Some(url) = &self.database_url {
            crate::db::Backend::from_url(url)
                .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        }

        self.bind_addr()?;
        Ok(())
    }

    /// Socket address the HTTP server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidConfig(format!("invalid listen address: {}", e)))
    }

    /// Retry policy for the startup sequencer
    pub fn readiness_policy(&self) -> ReadinessPolicy {
        ReadinessPolicy::new(
            self.db_connect_attempts,
            Duration::from_millis(self.db_connect_delay_ms),
        )
    }

    /// Connection target without credentials, for logging
    pub fn database_description(&self) -> String {
        match &self.database_url {
            Some(url) => match crate::db::Backend::from_url(url) {
                Ok(backend) => format!("{} (from DATABASE_URL)", backend),
                Err(_) => "unsupported DATABASE_URL".to_string(),
            },
            None => format!(
                "mysql://{}@{}:{}/{}",
                self.db_user, self.db_host, self.db_port, self.db_name
            ),
        }
    }

    /// Build the lazily-connecting pool described by this configuration
    pub fn connect(&self) -> DbResult<DatabaseConnection> {
        match &self.database_url {
            Some(url) => DatabaseConnection::connect_lazy(url, self.db_max_connections),
            None => {
                let options = MySqlConnectOptions::new()
                    .host(&self.db_host)
                    .port(self.db_port)
                    .username(&self.db_user)
                    .password(&self.db_password)
                    .database(&self.db_name);
                Ok(DatabaseConnection::mysql_lazy(options, self.db_max_connections))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Backend;

    fn parse(args: &[&str]) -> ApiConfig {
        let mut argv = vec!["items-api"];
        argv.extend_from_slice(args);
        ApiConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.db_host, "db");
        assert_eq!(config.db_port, 3306);
        assert_eq!(config.db_user, "dbuser");
        assert_eq!(config.db_name, "mydatabase");
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.readiness_policy(), ReadinessPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_description_hides_password() {
        let config = parse(&["--db-password", "hunter2"]);
        let description = config.database_description();
        assert_eq!(description, "mysql://dbuser@db:3306/mydatabase");
        assert!(!description.contains("hunter2"));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = parse(&["--db-connect-attempts", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_database_url_rejected() {
        let config = parse(&["--database-url", "postgres://localhost/items"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_host_rejected() {
        let config = parse(&["--host", "not an address"]);
        assert!(config.bind_addr().is_err());
    }

    #[tokio::test]
    async fn test_database_url_overrides_parts() {
        let config = parse(&["--database-url", "sqlite::memory:", "--db-max-connections", "1"]);
        let conn = config.connect().unwrap();
        assert_eq!(conn.backend(), Backend::Sqlite);
    }

    #[tokio::test]
    async fn test_parts_build_mysql_pool() {
        let config = parse(&[]);
        let conn = config.connect().unwrap();
        assert_eq!(conn.backend(), Backend::MySql);
    }
}
