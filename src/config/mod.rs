// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;
use crate::sensors::DEFAULT_QUANTIZATION_FACTOR;

/// Sensor HAL interface descriptors watched for restarts by default
pub const DEFAULT_SENSOR_SERVICES: [&str; 3] = [
    "android.hardware.sensors@1.0::ISensors",
    "android.hardware.sensors@2.0::ISensors",
    "android.hardware.sensors@2.1::ISensors",
];

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level or `EnvFilter` directive
    pub log_level: String,

    /// Event requantization
    pub quantization: QuantizationConfig,

    /// Sensor service restart detection
    pub restart: RestartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            quantization: QuantizationConfig::default(),
            restart: RestartConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if EnvFilter::try_new(&self.log_level).is_err() {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        self.quantization.validate()?;
        self.restart.validate()
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("sensor-device-utils"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Quantization configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizationConfig {
    /// Requantize events before delivery
    pub enabled: bool,

    /// Step as a fraction of the sensor resolution
    pub factor: f64,
}

impl Default for QuantizationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            factor: DEFAULT_QUANTIZATION_FACTOR,
        }
    }
}

impl QuantizationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(ConfigError::InvalidFactor(self.factor));
        }
        Ok(())
    }
}

/// Restart detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestartConfig {
    /// Service names whose registration signals a restart
    pub service_names: Vec<String>,

    /// Instance to watch; empty watches all instances
    pub instance_name: String,

    /// Timeout for bounded restart waits in milliseconds
    pub wait_timeout_ms: u64,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            service_names: DEFAULT_SENSOR_SERVICES.iter().map(|s| s.to_string()).collect(),
            instance_name: "default".to_string(),
            wait_timeout_ms: 1000,
        }
    }
}

impl RestartConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_names.is_empty() {
            return Err(ConfigError::NoServiceNames);
        }
        if let Some(index) = self.service_names.iter().position(|n| n.is_empty()) {
            return Err(ConfigError::EmptyServiceName(index));
        }
        if self.wait_timeout_ms == 0 {
            return Err(ConfigError::ZeroWaitTimeout);
        }
        Ok(())
    }
}
