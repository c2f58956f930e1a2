//! Bridge configuration.
//!
//! Three layers, lowest priority first: built-in defaults, an optional JSON
//! options file, then environment-variable overrides using the upper-cased
//! key names (`UDP_PORT`, `SYSTEM_NAME`, `PUBLISH_INTERVAL_MS`,
//! `LOG_LEVEL`). The options-file path comes from the CLI; when it does not
//! exist the file layer is simply skipped.

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default UDP port the WatchMon broadcasts on.
pub const DEFAULT_UDP_PORT: u16 = 18542;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// UDP port to bind for broadcast frames.
    pub udp_port: u16,
    /// Human-readable name of the battery system, used as discovery context.
    pub system_name: String,
    /// Snapshot publish cadence in milliseconds.
    pub publish_interval_ms: u64,
    /// Log filter (tracing env-filter syntax, e.g. `info` or
    /// `batbridge=debug`).
    pub log_level: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            udp_port: DEFAULT_UDP_PORT,
            system_name: "battery".to_string(),
            publish_interval_ms: 1000,
            log_level: "info".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration with defaults → file → environment precedence.
    pub fn load(path: Option<&Path>) -> Result<Self, BridgeError> {
        let mut config = BridgeConfig::default();
        if let Some(path) = path {
            if path.exists() {
                config = Self::from_file(path)?;
            } else {
                debug!("Options file {} not found, using defaults", path.display());
            }
        }
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parse the JSON options file. Missing keys keep their defaults.
    fn from_file(path: &Path) -> Result<Self, BridgeError> {
        let text = std::fs::read_to_string(path).map_err(|source| BridgeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| BridgeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides from the given lookup function.
    fn apply_env(
        &mut self,
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<(), BridgeError> {
        if let Some(value) = get("UDP_PORT") {
            self.udp_port = value.parse().map_err(|_| BridgeError::InvalidEnv {
                var: "UDP_PORT".to_string(),
                message: format!("not a port number: {:?}", value),
            })?;
        }
        if let Some(value) = get("SYSTEM_NAME") {
            self.system_name = value;
        }
        if let Some(value) = get("PUBLISH_INTERVAL_MS") {
            self.publish_interval_ms = value.parse().map_err(|_| BridgeError::InvalidEnv {
                var: "PUBLISH_INTERVAL_MS".to_string(),
                message: format!("not a millisecond count: {:?}", value),
            })?;
        }
        if let Some(value) = get("LOG_LEVEL") {
            self.log_level = value;
        }
        Ok(())
    }
}
