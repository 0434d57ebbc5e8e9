// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration loading.
//!
//! Precedence, lowest first: built-in defaults, TOML file, environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::predict::PredictorSettings;

/// Config file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "devicefit.toml";

pub const ENV_DATA_DIR: &str = "DEVICEFIT_DATA_DIR";
pub const ENV_ORIGIN: &str = "DEVICEFIT_ORIGIN";
pub const ENV_BETA: &str = "DEVICEFIT_BETA";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Directory holding persisted device history.
    pub data_dir: PathBuf,
    /// Where the app is served from; local hosts enable developer mode.
    pub origin: Option<String>,
    pub gpu_api_available: bool,
    pub app_is_beta: bool,
    pub min_input_tokens_per_sec: f64,
    pub min_output_tokens_per_sec: f64,
    pub storage_to_memory_ratio: f64,
    pub cache_capacity: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        let settings = PredictorSettings::default();
        Self {
            data_dir: PathBuf::from(".devicefit"),
            origin: None,
            gpu_api_available: true,
            app_is_beta: settings.app_is_beta,
            min_input_tokens_per_sec: settings.min_input_tokens_per_sec,
            min_output_tokens_per_sec: settings.min_output_tokens_per_sec,
            storage_to_memory_ratio: settings.storage_to_memory_ratio,
            cache_capacity: settings.cache_capacity,
        }
    }
}

impl FitConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if present, then
    /// apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// [`load`](Self::load)).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(origin) = lookup(ENV_ORIGIN) {
            self.origin = if origin.is_empty() { None } else { Some(origin) };
        }
        if let Some(beta) = lookup(ENV_BETA) {
            self.app_is_beta = parse_bool(&beta).ok_or_else(|| ConfigError::InvalidValue {
                field: ENV_BETA,
                reason: format!("expected true/false, got '{}'", beta),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("min_input_tokens_per_sec", self.min_input_tokens_per_sec),
            ("min_output_tokens_per_sec", self.min_output_tokens_per_sec),
            ("storage_to_memory_ratio", self.storage_to_memory_ratio),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                });
            }
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data_dir",
                reason: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn predictor_settings(&self) -> PredictorSettings {
        PredictorSettings {
            min_input_tokens_per_sec: self.min_input_tokens_per_sec,
            min_output_tokens_per_sec: self.min_output_tokens_per_sec,
            storage_to_memory_ratio: self.storage_to_memory_ratio,
            cache_capacity: self.cache_capacity,
            app_is_beta: self.app_is_beta,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
