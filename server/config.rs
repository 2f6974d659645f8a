use tracing::Level;

use crate::error::ConfigError;

pub const HOST_VAR: &str = "SOIL_ANALYZER_HOST";
pub const PORT_VAR: &str = "SOIL_ANALYZER_PORT";
pub const LOG_VAR: &str = "SOIL_ANALYZER_LOG";

/// Server settings. Classifier thresholds are not part of this; they are
/// fixed in `Thresholds::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: Level,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { host: "0.0.0.0".to_owned(), port: 8000, log_level: Level::INFO }
    }
}

impl ServerConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup` on top of the defaults. Unset or blank
    /// variables keep the default; malformed ones are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        if let Some(host) = get(HOST_VAR) {
            config.host = host;
        }
        if let Some(port) = get(PORT_VAR) {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }
        if let Some(level) = get(LOG_VAR) {
            config.log_level = level.parse().map_err(|_| ConfigError::InvalidLogLevel(level))?;
        }
        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_bind_all_interfaces_on_8000() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr(), "0.0.0.0:8000");
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            (HOST_VAR, "127.0.0.1"),
            (PORT_VAR, " 9090 "),
            (LOG_VAR, "debug"),
        ]))
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:9090");
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[(PORT_VAR, "  ")])).unwrap();
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[(PORT_VAR, "80000")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("80000".to_owned()));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[(LOG_VAR, "loud")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("loud".to_owned()));
    }
}
