// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Error types

use thiserror::Error;

/// Invalid configuration values
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Quantization factor must be finite and positive.
    #[error("invalid quantization factor: {0}")]
    InvalidFactor(f64),

    /// No sensor service names to watch.
    #[error("no sensor service names configured")]
    NoServiceNames,

    /// A watched service name is empty.
    #[error("empty sensor service name at index {0}")]
    EmptyServiceName(usize),

    /// Bounded waits need a non-zero timeout.
    #[error("restart wait timeout must be non-zero")]
    ZeroWaitTimeout,

    /// Log filter directive could not be parsed.
    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),
}
