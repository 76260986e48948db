//! Codec configuration
//!
//! Every setting has a default matching the strict protocol behaviour, so an
//! empty file (or `CodecConfig::default()`) is a valid configuration.

use crate::validate::{GapPolicy, ValidationRules};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Top-level codec configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CodecConfig {
    #[serde(default)]
    pub dispatch: DispatchSection,
    #[serde(default)]
    pub validation: ValidationSection,
    #[serde(default)]
    pub limits: LimitsSection,
}

/// Version dispatch settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchSection {
    /// Reject documents whose own `version` field names a different family
    /// than the declared tag
    #[serde(default = "default_true")]
    pub require_version_match: bool,
}

impl Default for DispatchSection {
    fn default() -> Self {
        Self {
            require_version_match: true,
        }
    }
}

/// Graph validation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationSection {
    /// Run the graph validator as part of `decode`
    #[serde(default = "default_true")]
    pub validate_on_decode: bool,
    /// How gaps between consecutive sequence ids are treated
    #[serde(default)]
    pub sequence_gaps: GapPolicy,
}

impl Default for ValidationSection {
    fn default() -> Self {
        Self {
            validate_on_decode: true,
            sequence_gaps: GapPolicy::default(),
        }
    }
}

/// Resource limits applied before parsing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LimitsSection {
    /// Largest accepted payload in bytes; unlimited when absent
    pub max_payload_bytes: Option<usize>,
}

fn default_true() -> bool {
    true
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CodecConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that deserialize fine but cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_payload_bytes == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "limits.max_payload_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Validation rules derived from the `[validation]` section
    pub fn rules(&self) -> ValidationRules {
        ValidationRules {
            sequence_gaps: self.validation.sequence_gaps,
        }
    }
}
