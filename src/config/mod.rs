//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// Environment variable naming a YAML configuration file
pub const CONFIG_PATH_ENV: &str = "SCOUTBASE_CONFIG";

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_graphiql() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Server configuration
///
/// Every field has a default, so an empty document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "0.0.0.0", "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Serve the GraphiQL console at /graphiql
    #[serde(default = "default_graphiql")]
    pub graphiql: bool,

    /// Fallback log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Allow cross-origin requests from any origin
    #[serde(default)]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            graphiql: default_graphiql(),
            log_level: default_log_level(),
            cors: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration for the binary
    ///
    /// Reads the file named by `SCOUTBASE_CONFIG` if set, then applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `SCOUTBASE_HOST`, `SCOUTBASE_PORT` and `SCOUTBASE_LOG` overrides
    ///
    /// The lookup function is injected so tests don't touch the process
    /// environment.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("SCOUTBASE_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("SCOUTBASE_PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: "port".to_string(),
                value: port.clone(),
                message: "expected an integer between 1 and 65535".to_string(),
            })?;
        }
        if let Some(level) = lookup("SCOUTBASE_LOG") {
            self.log_level = level;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check field values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: "0".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }
        self.host
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "host".to_string(),
                value: self.host.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// The socket address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .host
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "host".to_string(),
                value: self.host.clone(),
                message: e.to_string(),
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.graphiql);
        assert!(!config.cors);
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(
            ServerConfig::from_yaml_str("").unwrap(),
            ServerConfig::default()
        );
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = ServerConfig::from_yaml_str("port: 8080\ngraphiql: false\n").unwrap();

        assert_eq!(config.port, 8080);
        assert!(!config.graphiql);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            cors: true,
            ..ServerConfig::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = ServerConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_host_rejected() {
        let err = ServerConfig::from_yaml_str("host: not-an-ip\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "host"));
    }

    #[test]
    fn test_zero_port_rejected() {
        assert!(ServerConfig::from_yaml_str("port: 0\n").is_err());
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let err = ServerConfig::from_yaml_str("port: [3000\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SCOUTBASE_HOST", "127.0.0.1"),
            ("SCOUTBASE_PORT", "4000"),
            ("SCOUTBASE_LOG", "debug"),
        ]
        .into_iter()
        .collect();

        let config = ServerConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4000);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_env_override_bad_port() {
        let result = ServerConfig::default().with_overrides(|key| {
            (key == "SCOUTBASE_PORT").then(|| "three thousand".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_from_missing_file() {
        let err = ServerConfig::from_yaml_file("/nonexistent/scoutbase.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scoutbase.yaml");
        std::fs::write(&path, "host: 127.0.0.1\nport: 3100\ncors: true\n").unwrap();

        let config = ServerConfig::from_yaml_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.port, 3100);
        assert!(config.cors);
    }
}
