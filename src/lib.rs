// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Sensor device utilities for a hardware sensor broker
//!
//! Two independent primitives:
//! - **Requantization** of HAL sensor events to a fraction (default 1/8) of
//!   each sensor's resolution, so output never claims more precision than
//!   the hardware while calibration corrections stay visible.
//! - **Restart detection**: a resettable waiter that blocks until the sensor
//!   HAL service (re)registers with the service manager.
//!
//! ```text
//!  HAL events ──► Quantizer ──► event delivery
//!                    ▲
//!           ResolutionTable (per sensor type)
//!
//!  ServiceManager ──on_registration──► RestartWaiter ◄── wait()/reset()
//!                                                          recovery supervisor
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod sensors;

// Re-exports for convenience
pub use config::Config;
pub use core::{RestartWaiter, ServiceManager, ServiceNotification, ServiceRegistry, WaiterState};
pub use error::ConfigError;
pub use sensors::{
    quantize_sensor_event_values, quantize_value, resolution_for_sensor, Quantizer,
    SensorDescriptor, SensorEvent, SensorType,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "sensor-device-utils";
