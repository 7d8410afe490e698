//! Proxy configuration

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_PUBLIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Configuration for the edge proxy
#[derive(Debug, Clone, Parser)]
#[command(name = "edge-proxy", version, about = "Serves the frontend and forwards /api to the items API")]
pub struct ProxyConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Origin of the items API
    #[arg(long, env = "API_URL", default_value = "http://backend:3000")]
    pub api_url: String,

    /// Directory holding index.html and the other static assets
    #[arg(long, env = "PUBLIC_DIR", default_value = DEFAULT_PUBLIC_DIR)]
    pub public_dir: PathBuf,

    /// Largest request body forwarded to the API
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_body_bytes: usize,
}

impl ProxyConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidConfig(
                "max_body_bytes must be greater than 0".to_string(),
            ));
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

    /// Entry document served for unmatched paths
    pub fn index_file(&self) -> PathBuf {
        self.public_dir.join("index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ProxyConfig {
        let mut argv = vec!["edge-proxy"];
        argv.extend_from_slice(args);
        ProxyConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_url, "http://backend:3000");
        assert_eq!(config.max_body_bytes, 10 * 1024 * 1024);
        assert!(config.index_file().ends_with("public/index.html"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_public_dir_ships_index() {
        assert!(parse(&[]).index_file().is_file());
    }

    #[test]
    fn test_overrides() {
        let config = parse(&["--api-url", "http://localhost:4000", "--port", "8080"]);
        assert_eq!(config.api_url, "http://localhost:4000");
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_zero_body_limit_rejected() {
        assert!(parse(&["--max-body-bytes", "0"]).validate().is_err());
    }
}
