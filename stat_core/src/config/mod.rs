//! Tunable numbers, loaded from TOML

mod constants;

pub use constants::{
    constants, init_constants, init_constants_default, CombatConstants, GameConstants,
    ProgressionConstants, ScalingConstants,
};

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{}': {error}", .path.display())]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: toml::de::Error,
        path: Option<PathBuf>,
    },
    #[error("Validation error in '{path:?}': {message}")]
    Validation {
        message: String,
        path: Option<PathBuf>,
    },
}

impl ConfigError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ConfigError::Validation {
            message: message.into(),
            path: None,
        }
    }

    /// Attach the file a path-less error came from
    pub(crate) fn at(self, file: &Path) -> Self {
        match self {
            ConfigError::Parse { error, path: None } => ConfigError::Parse {
                error,
                path: Some(file.to_path_buf()),
            },
            ConfigError::Validation {
                message,
                path: None,
            } => ConfigError::Validation {
                message,
                path: Some(file.to_path_buf()),
            },
            other => other,
        }
    }
}

/// Read and parse a TOML file
pub(crate) fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
        error,
        path: path.to_path_buf(),
    })?;
    parse_toml(&content).map_err(|error| error.at(path))
}

/// Parse a TOML string
pub(crate) fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|error| ConfigError::Parse { error, path: None })
}
