//! TOML configuration for the clean-architecture package roots.

use crate::pattern::{PackagePattern, PatternError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Package roots and accepted dependencies for a checked project.
///
/// Every field is a package-path pattern (see [`PackagePattern`] for the
/// wildcard grammar). The configuration is an immutable value threaded by
/// reference into every rule; there is no process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchConfig {
    /// Enterprise-business (core/entity) package pattern.
    pub enterprise_business: String,

    /// Application-business (use case) package pattern.
    pub application_business: String,

    /// Interface-adapters controller package pattern.
    pub adapters_controller: String,

    /// Interface-adapters presenter package pattern.
    pub adapters_presenter: String,

    /// Interface-adapters infrastructure package pattern.
    pub adapters_infra: String,

    /// Package pattern for the ports through which the core talks to adapters.
    pub communication: String,

    /// Additional package patterns entities may depend on, beyond the
    /// enterprise-business package itself.
    #[serde(default)]
    pub accepted_entity_dependencies: Vec<String>,
}

impl ArchConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a pattern is malformed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates that every declared pattern is non-empty and well formed.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("enterprise_business", &self.enterprise_business),
            ("application_business", &self.application_business),
            ("adapters_controller", &self.adapters_controller),
            ("adapters_presenter", &self.adapters_presenter),
            ("adapters_infra", &self.adapters_infra),
            ("communication", &self.communication),
        ];
        for (field, pattern) in named {
            PackagePattern::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                field: field.to_string(),
                source,
            })?;
        }
        for pattern in &self.accepted_entity_dependencies {
            PackagePattern::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                field: "accepted_entity_dependencies".to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Errors loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {message}")]
    Parse {
        /// Parse error detail.
        message: String,
    },

    /// A declared package pattern is empty or malformed.
    #[error("config field `{field}`: {source}")]
    InvalidPattern {
        /// Field with the bad pattern.
        field: String,
        /// Underlying pattern error.
        source: PatternError,
    },
}
