//! Companion configuration, loaded from YAML.
//!
//! ```yaml
//! device:
//!   name: Mount
//! link:
//!   address: 127.0.0.1:9000
//! display:
//!   utc_offset_minutes: -300
//! logging:
//!   filter: info,omc_companion=debug
//! metrics:
//!   listen: 0.0.0.0:9100
//! ```
//!
//! Every section and field is optional.

use std::net::SocketAddr;
use std::path::Path;

use omc_protocol::{DisplayZone, DEVICE_NAME};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// Where a local BLE bridge listens by default.
pub const DEFAULT_LINK_ADDRESS: &str = "127.0.0.1:9000";

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompanionConfig {
    pub device: DeviceConfig,
    pub link: LinkConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

impl CompanionConfig {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration text. An empty document gives the defaults.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }
}

/// The receiver being talked to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    /// Name used in logs and metric labels.
    pub name: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            name: DEVICE_NAME.to_string(),
        }
    }
}

/// Link to the BLE bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    /// `host:port` of the bridge.
    pub address: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            address: DEFAULT_LINK_ADDRESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Fixed UTC offset for fix times. The host zone is used when unset.
    pub utc_offset_minutes: Option<i32>,
}

impl DisplayConfig {
    /// Zone fix times are rendered in.
    pub fn zone(&self) -> DisplayZone {
        match self.utc_offset_minutes {
            None => DisplayZone::Local,
            Some(minutes) => DisplayZone::from_offset_minutes(minutes).unwrap_or_else(|| {
                warn!(minutes, "UTC offset out of range, using the host zone");
                DisplayZone::Local
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive. `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsConfig {
    /// Address for the Prometheus endpoint. Needs the `prometheus` feature.
    pub listen: Option<SocketAddr>,
}
