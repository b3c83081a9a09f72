//! Configuration file support for autoload.
//!
//! Loads and validates discovery settings from TOML files.
//! Default location: /etc/sonic/autoload.toml

use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sonic/autoload.toml";

/// Discovery tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Vendor-type substrings (case-insensitive) whose inventory rows are
    /// never materialized
    #[serde(default = "default_entity_blacklist")]
    pub entity_blacklist: Vec<String>,

    /// Regex matched against `ifDescr` and `ifType`; matching interfaces are
    /// not ports
    #[serde(default = "default_port_exclude_pattern")]
    pub port_exclude_pattern: String,

    /// Vendor reported in the root attributes
    #[serde(default = "default_vendor")]
    pub vendor: String,

    /// OS families accepted by `validate_os`
    #[serde(default = "default_supported_os")]
    pub supported_os: Vec<String>,

    /// Reject devices whose `sysDescr` names no supported OS family
    #[serde(default)]
    pub validate_os: bool,
}

/// Complete autoload configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoloadConfig {
    /// Discovery configuration
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Product id (last `sysObjectID` arc) to model name
    #[serde(default)]
    pub models: BTreeMap<String, String>,
}

fn default_entity_blacklist() -> Vec<String> {
    ["alarm", "fan", "sensor", "other"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_port_exclude_pattern() -> String {
    "serial|stack|engine|management|vlan|other|softwareLoopback|tunnel|fibreChannel|eth[0-9]"
        .to_string()
}

fn default_vendor() -> String {
    "Brocade".to_string()
}

fn default_supported_os() -> Vec<String> {
    vec!["VDX".to_string()]
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            entity_blacklist: default_entity_blacklist(),
            port_exclude_pattern: default_port_exclude_pattern(),
            vendor: default_vendor(),
            supported_os: default_supported_os(),
            validate_os: false,
        }
    }
}

impl AutoloadConfig {
    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => {
                let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "Config file {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Compiled port exclusion pattern
    pub fn port_exclude_regex(&self) -> Result<Regex, ConfigError> {
        Regex::new(&self.discovery.port_exclude_pattern)
            .map_err(|e| ConfigError::invalid("discovery.port_exclude_pattern", e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.port_exclude_regex()?;

        if self.discovery.entity_blacklist.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::invalid(
                "discovery.entity_blacklist",
                "entries must not be empty",
            ));
        }

        if self.discovery.validate_os && self.discovery.supported_os.is_empty() {
            return Err(ConfigError::invalid(
                "discovery.supported_os",
                "must list at least one OS family when validate_os is set",
            ));
        }

        Ok(())
    }
}
