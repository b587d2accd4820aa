//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `aquahub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use aquahub_adapter_remote_http::ControllerConfig;
use aquahub_domain::reservoir::DEFAULT_CAPACITY;
use aquahub_domain::threshold::{DEFAULT_THRESHOLD, check_threshold};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Remote hardware controller.
    pub controller: ControllerConfig,
    /// Reservoir sizing.
    pub reservoir: ReservoirConfig,
    /// Initial trigger threshold.
    pub threshold: ThresholdConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Reservoir configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReservoirConfig {
    /// Maximum volume in liters. The reservoir starts full.
    pub capacity: u32,
}

/// Threshold configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Threshold in effect at startup.
    pub initial: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `aquahub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("aquahub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("AQUAHUB_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("AQUAHUB_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("AQUAHUB_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("AQUAHUB_CONTROLLER_HOST") {
            self.controller.host = val;
        }
        if let Some(port) = var("AQUAHUB_CONTROLLER_PORT").and_then(|val| val.parse().ok()) {
            self.controller.port = port;
        }
        if let Some(timeout) =
            var("AQUAHUB_CONTROLLER_TIMEOUT_MS").and_then(|val| val.parse().ok())
        {
            self.controller.timeout_ms = timeout;
        }
        if let Some(val) = var("AQUAHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.controller.port == 0 {
            return Err(ConfigError::Validation(
                "controller port must be non-zero".to_string(),
            ));
        }
        if self.controller.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "controller timeout must be non-zero".to_string(),
            ));
        }
        if self.reservoir.capacity == 0 {
            return Err(ConfigError::Validation(
                "reservoir capacity must be non-zero".to_string(),
            ));
        }
        check_threshold(i64::from(self.threshold.initial))
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for ReservoirConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            initial: DEFAULT_THRESHOLD,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "aquahubd=info,aquahub=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.controller.port, 3001);
        assert_eq!(config.reservoir.capacity, 100);
        assert_eq!(config.threshold.initial, 500);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [controller]
            host = '10.0.0.5'
            port = 8081
            timeout_ms = 750

            [reservoir]
            capacity = 40

            [threshold]
            initial = 300

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.controller.host, "10.0.0.5");
        assert_eq!(config.controller.port, 8081);
        assert_eq!(config.controller.timeout_ms, 750);
        assert_eq!(config.reservoir.capacity, 40);
        assert_eq!(config.threshold.initial, 300);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [controller]
            host = 'feeder.local'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.controller.host, "feeder.local");
        assert_eq!(config.controller.port, 3001);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("AQUAHUB_BIND", "127.0.0.1:8088"),
            ("AQUAHUB_CONTROLLER_HOST", "192.168.1.50"),
            ("AQUAHUB_CONTROLLER_PORT", "3005"),
            ("AQUAHUB_CONTROLLER_TIMEOUT_MS", "1200"),
            ("AQUAHUB_LOG", "trace"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8088");
        assert_eq!(config.controller.host, "192.168.1.50");
        assert_eq!(config.controller.port, 3005);
        assert_eq!(config.controller.timeout_ms, 1200);
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparseable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("AQUAHUB_PORT", "not-a-port")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_prefer_rust_log_over_aquahub_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("AQUAHUB_LOG", "warn"), ("RUST_LOG", "debug")]));
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_timeout() {
        let mut config = Config::default();
        config.controller.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_capacity() {
        let mut config = Config::default();
        config.reservoir.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_out_of_range_initial_threshold() {
        let mut config = Config::default();
        config.threshold.initial = 1024;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }
}
