// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Logging setup for embedders

use anyhow::{anyhow, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::error::ConfigError;

/// Install a global fmt subscriber filtered by `level`.
///
/// `level` is any `EnvFilter` directive, e.g. `"debug"` or
/// `"sensor_device_utils=trace"`. Fails if a global subscriber is already set.
pub fn init(level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).map_err(|_| ConfigError::InvalidLogLevel(level.to_string()))?;

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}
