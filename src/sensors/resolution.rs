// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Per-type resolution overrides

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use super::{SensorDescriptor, SensorType};

/// Resolution used for one-shot and event-style sensors, whose HAL-reported
/// resolution is not meaningful
pub const EVENT_SENSOR_RESOLUTION: f32 = 1.0;

/// Where the quantization resolution of a sensor type comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolutionRule {
    /// Use the resolution the sensor advertises
    Nominal,
    /// Ignore the advertised resolution
    Fixed(f32),
}

fn rule_for(sensor_type: SensorType) -> ResolutionRule {
    match sensor_type {
        SensorType::MetaData
        | SensorType::SignificantMotion
        | SensorType::StepDetector
        | SensorType::StepCounter
        | SensorType::TiltDetector
        | SensorType::WakeGesture
        | SensorType::GlanceGesture
        | SensorType::PickUpGesture
        | SensorType::WristTiltGesture
        | SensorType::StationaryDetect
        | SensorType::MotionDetect => ResolutionRule::Fixed(EVENT_SENSOR_RESOLUTION),
        _ => ResolutionRule::Nominal,
    }
}

/// Mapping from every known sensor type to its resolution rule
#[derive(Debug, Clone)]
pub struct ResolutionTable {
    rules: HashMap<SensorType, ResolutionRule>,
}

impl ResolutionTable {
    fn build() -> Self {
        let rules: HashMap<_, _> = SensorType::KNOWN
            .iter()
            .map(|&t| (t, rule_for(t)))
            .collect();
        debug!("Built resolution table for {} sensor types", rules.len());
        Self { rules }
    }

    /// Process-wide table, built on first use
    pub fn global() -> &'static ResolutionTable {
        static TABLE: OnceLock<ResolutionTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    /// Rule for `sensor_type`; vendor and unknown types use the nominal resolution
    pub fn rule(&self, sensor_type: SensorType) -> ResolutionRule {
        self.rules
            .get(&sensor_type)
            .copied()
            .unwrap_or(ResolutionRule::Nominal)
    }

    pub fn resolve(&self, sensor: &SensorDescriptor) -> f32 {
        match self.rule(sensor.sensor_type) {
            ResolutionRule::Nominal => sensor.resolution,
            ResolutionRule::Fixed(resolution) => resolution,
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Resolution to feed into quantization for `sensor`
pub fn resolution_for_sensor(sensor: &SensorDescriptor) -> f32 {
    ResolutionTable::global().resolve(sensor)
}

/// Quantization resolution per sensor handle
#[derive(Debug, Clone, Default)]
pub struct ResolutionMap {
    by_handle: HashMap<i32, f32>,
}

impl ResolutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sensors<'a>(sensors: impl IntoIterator<Item = &'a SensorDescriptor>) -> Self {
        let by_handle = sensors
            .into_iter()
            .map(|s| (s.handle, resolution_for_sensor(s)))
            .collect();
        Self { by_handle }
    }

    pub fn insert(&mut self, sensor: &SensorDescriptor) {
        self.by_handle.insert(sensor.handle, resolution_for_sensor(sensor));
    }

    pub fn remove(&mut self, handle: i32) -> Option<f32> {
        self.by_handle.remove(&handle)
    }

    pub fn get(&self, handle: i32) -> Option<f32> {
        self.by_handle.get(&handle).copied()
    }

    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_known_types() {
        let table = ResolutionTable::global();
        assert_eq!(table.len(), SensorType::KNOWN.len());
        for t in SensorType::KNOWN {
            assert_eq!(table.rule(t), rule_for(t));
        }
    }

    #[test]
    fn test_nominal_resolution() {
        let sensor = SensorDescriptor::new(1, SensorType::Accelerometer, 0.0048);
        assert_eq!(resolution_for_sensor(&sensor), 0.0048);

        let sensor = SensorDescriptor::new(2, SensorType::Pressure, 0.0);
        assert_eq!(resolution_for_sensor(&sensor), 0.0);
    }

    #[test]
    fn test_event_sensors_use_fixed_resolution() {
        for t in [SensorType::StepCounter, SensorType::SignificantMotion, SensorType::WakeGesture] {
            let sensor = SensorDescriptor::new(3, t, 0.0001);
            assert_eq!(resolution_for_sensor(&sensor), EVENT_SENSOR_RESOLUTION);
        }
    }

    #[test]
    fn test_vendor_type_uses_nominal() {
        let sensor = SensorDescriptor::new(4, SensorType::Custom(0x10001), 0.25);
        assert_eq!(ResolutionTable::global().rule(sensor.sensor_type), ResolutionRule::Nominal);
        assert_eq!(resolution_for_sensor(&sensor), 0.25);
    }

    #[test]
    fn test_resolution_map() {
        let sensors = [
            SensorDescriptor::new(1, SensorType::Gyroscope, 0.001),
            SensorDescriptor::new(2, SensorType::StepDetector, 0.0),
        ];
        let mut map = ResolutionMap::from_sensors(&sensors);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(1), Some(0.001));
        assert_eq!(map.get(2), Some(EVENT_SENSOR_RESOLUTION));
        assert_eq!(map.get(3), None);

        map.insert(&SensorDescriptor::new(3, SensorType::Light, 1.0));
        assert_eq!(map.get(3), Some(1.0));
        assert_eq!(map.remove(1), Some(0.001));
        assert_eq!(map.get(1), None);
    }
}
