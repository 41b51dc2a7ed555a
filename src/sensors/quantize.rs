// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Requantization of sensor samples to a fraction of the sensor resolution
//!
//! The quantization step is `factor * resolution` with a default factor of
//! 0.125, i.e. eight times finer than the nominal resolution. Snapping to a
//! finer grid than advertised keeps small corrections such as runtime
//! calibration offsets visible after requantization.

use rayon::prelude::*;
use tracing::trace;

use super::resolution::ResolutionMap;
use super::{SensorEvent, SensorType};
use crate::config::QuantizationConfig;
use crate::error::ConfigError;

/// Default fraction of the resolution used as quantization step
pub const DEFAULT_QUANTIZATION_FACTOR: f64 = 0.125;

/// Quantize a single value using the default factor.
///
/// See [`quantize_value_with_factor`].
pub fn quantize_value(value: f32, resolution: f64) -> f32 {
    quantize_value_with_factor(value, resolution, DEFAULT_QUANTIZATION_FACTOR)
}

/// Snap `value` to the nearest multiple of `factor * resolution`.
///
/// Ties round half away from zero (`f64::round`). The arithmetic runs in
/// `f64` and the result is narrowed back to `f32`, so applying the function
/// twice yields the same value as applying it once.
///
/// A resolution of zero means the resolution is unknown and the value is
/// returned unchanged. NaN and infinite inputs propagate through the
/// arithmetic.
pub fn quantize_value_with_factor(value: f32, resolution: f64, factor: f64) -> f32 {
    if resolution == 0.0 {
        return value;
    }

    let step = factor * resolution;
    ((f64::from(value) / step).round() * step) as f32
}

/// Quantize the continuous payload fields of `event` using the default factor.
///
/// Timestamp, sensor handle and type are never touched.
pub fn quantize_sensor_event_values(event: &mut SensorEvent, resolution: f32) {
    Quantizer::default().quantize_event(event, resolution);
}

/// Which payload fields of an event carry a continuous quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadQuantization {
    /// x, y, z of a vector; status left alone
    Vector,
    /// Measurement and bias vectors
    Uncalibrated,
    Scalar,
    /// Scalar value; accuracy/status left alone
    ScalarWithStatus,
    RotationVector,
    Pose,
    /// Not a continuous quantity
    PassThrough,
}

impl PayloadQuantization {
    pub fn for_type(sensor_type: SensorType) -> Self {
        match sensor_type {
            SensorType::Accelerometer
            | SensorType::MagneticField
            | SensorType::Orientation
            | SensorType::Gyroscope
            | SensorType::Gravity
            | SensorType::LinearAcceleration => PayloadQuantization::Vector,

            SensorType::AccelerometerUncalibrated
            | SensorType::GyroscopeUncalibrated
            | SensorType::MagneticFieldUncalibrated => PayloadQuantization::Uncalibrated,

            SensorType::Light
            | SensorType::Pressure
            | SensorType::Temperature
            | SensorType::AmbientTemperature
            | SensorType::RelativeHumidity
            | SensorType::HingeAngle => PayloadQuantization::Scalar,

            SensorType::HeartRate => PayloadQuantization::ScalarWithStatus,

            SensorType::RotationVector
            | SensorType::GameRotationVector
            | SensorType::GeomagneticRotationVector => PayloadQuantization::RotationVector,

            SensorType::Pose6Dof => PayloadQuantization::Pose,

            // Proximity, counters, detectors, gestures, meta events, vendor types
            _ => PayloadQuantization::PassThrough,
        }
    }
}

/// Event quantizer with a configurable factor
#[derive(Debug, Clone, Copy)]
pub struct Quantizer {
    factor: f64,
    enabled: bool,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(DEFAULT_QUANTIZATION_FACTOR)
    }
}

impl Quantizer {
    /// `factor` must be finite and positive.
    pub fn new(factor: f64) -> Self {
        debug_assert!(factor.is_finite() && factor > 0.0, "invalid quantization factor {}", factor);
        Self { factor, enabled: true }
    }

    pub fn from_config(config: &QuantizationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            factor: config.factor,
            enabled: config.enabled,
        })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Quantize the fields selected by the event's sensor type in place.
    ///
    /// An event whose payload shape does not match its type passes through.
    pub fn quantize_event(&self, event: &mut SensorEvent, resolution: f32) {
        if !self.enabled || resolution == 0.0 {
            return;
        }

        let resolution = f64::from(resolution);
        let factor = self.factor;
        let snap = |v: &mut f32| *v = quantize_value_with_factor(*v, resolution, factor);

        let payload = &mut event.payload;
        let applied = match PayloadQuantization::for_type(event.sensor_type) {
            PayloadQuantization::Vector => payload
                .vector_mut()
                .map(|v| v.components_mut().into_iter().for_each(snap)),
            PayloadQuantization::Uncalibrated => payload
                .uncalibrated_mut()
                .map(|u| u.components_mut().into_iter().for_each(snap)),
            PayloadQuantization::Scalar => payload.scalar_mut().map(snap),
            PayloadQuantization::ScalarWithStatus => {
                payload.scalar_with_status_mut().map(|s| snap(&mut s.value))
            }
            PayloadQuantization::RotationVector => {
                payload.rotation_vector_mut().map(|r| r.iter_mut().for_each(snap))
            }
            PayloadQuantization::Pose => payload.pose_mut().map(|p| p.iter_mut().for_each(snap)),
            PayloadQuantization::PassThrough => return,
        };

        if applied.is_none() {
            trace!(
                "Payload of sensor {} does not match type {:?}, left unquantized",
                event.sensor,
                event.sensor_type
            );
        }
    }

    /// Quantize a batch of distinct events in parallel.
    ///
    /// Each event's resolution is looked up by sensor handle; events from
    /// unknown sensors pass through. Returns the number of events for which
    /// a resolution was found, or 0 when quantization is disabled.
    pub fn quantize_batch(
        &self,
        events: &mut [SensorEvent],
        resolutions: &ResolutionMap,
    ) -> usize {
        if !self.enabled {
            return 0;
        }

        events
            .par_iter_mut()
            .filter_map(|event| {
                let resolution = resolutions.get(event.sensor)?;
                self.quantize_event(event, resolution);
                Some(())
            })
            .count()
    }
}
