// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Sensor descriptors and events as delivered by the sensor HAL

use serde::{Deserialize, Serialize};

/// Sensor types reported by the HAL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    MetaData,

    // Motion
    Accelerometer,
    AccelerometerUncalibrated,
    Gyroscope,
    GyroscopeUncalibrated,
    Gravity,
    LinearAcceleration,

    // Position
    MagneticField,
    MagneticFieldUncalibrated,
    Orientation,
    RotationVector,
    GameRotationVector,
    GeomagneticRotationVector,
    Pose6Dof,
    DeviceOrientation,
    HingeAngle,

    // Environmental
    Light,
    Pressure,
    Temperature,
    AmbientTemperature,
    RelativeHumidity,
    Proximity,

    // Body
    HeartRate,
    HeartBeat,
    LowLatencyOffbodyDetect,

    // One-shot / event style
    SignificantMotion,
    StepDetector,
    StepCounter,
    TiltDetector,
    WakeGesture,
    GlanceGesture,
    PickUpGesture,
    WristTiltGesture,
    StationaryDetect,
    MotionDetect,

    AdditionalInfo,
    DynamicSensorMeta,

    Custom(u32),        // Vendor-defined
}

impl SensorType {
    /// Every type with a fixed meaning; `Custom` is excluded.
    pub const KNOWN: [SensorType; 37] = [
        SensorType::MetaData,
        SensorType::Accelerometer,
        SensorType::AccelerometerUncalibrated,
        SensorType::Gyroscope,
        SensorType::GyroscopeUncalibrated,
        SensorType::Gravity,
        SensorType::LinearAcceleration,
        SensorType::MagneticField,
        SensorType::MagneticFieldUncalibrated,
        SensorType::Orientation,
        SensorType::RotationVector,
        SensorType::GameRotationVector,
        SensorType::GeomagneticRotationVector,
        SensorType::Pose6Dof,
        SensorType::DeviceOrientation,
        SensorType::HingeAngle,
        SensorType::Light,
        SensorType::Pressure,
        SensorType::Temperature,
        SensorType::AmbientTemperature,
        SensorType::RelativeHumidity,
        SensorType::Proximity,
        SensorType::HeartRate,
        SensorType::HeartBeat,
        SensorType::LowLatencyOffbodyDetect,
        SensorType::SignificantMotion,
        SensorType::StepDetector,
        SensorType::StepCounter,
        SensorType::TiltDetector,
        SensorType::WakeGesture,
        SensorType::GlanceGesture,
        SensorType::PickUpGesture,
        SensorType::WristTiltGesture,
        SensorType::StationaryDetect,
        SensorType::MotionDetect,
        SensorType::AdditionalInfo,
        SensorType::DynamicSensorMeta,
    ];
}

/// Static description of a sensor as advertised by the HAL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorDescriptor {
    pub handle: i32,
    pub name: String,
    pub vendor: String,
    pub sensor_type: SensorType,
    /// Smallest distinguishable change in output units; 0 when unknown
    pub resolution: f32,
    pub max_range: f32,
    pub min_delay_us: i32,
}

impl SensorDescriptor {
    pub fn new(handle: i32, sensor_type: SensorType, resolution: f32) -> Self {
        Self {
            handle,
            name: String::new(),
            vendor: String::new(),
            sensor_type,
            resolution,
            max_range: 0.0,
            min_delay_us: 0,
        }
    }
}

/// Three-axis measurement with a categorical status
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub status: i8,
}

impl SensorVector {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, status: 0 }
    }

    pub fn components_mut(&mut self) -> [&mut f32; 3] {
        [&mut self.x, &mut self.y, &mut self.z]
    }
}

/// Uncalibrated measurement together with the HAL's bias estimate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UncalibratedVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub x_bias: f32,
    pub y_bias: f32,
    pub z_bias: f32,
}

impl UncalibratedVector {
    pub fn components_mut(&mut self) -> [&mut f32; 6] {
        [
            &mut self.x,
            &mut self.y,
            &mut self.z,
            &mut self.x_bias,
            &mut self.y_bias,
            &mut self.z_bias,
        ]
    }
}

/// Scalar value with a categorical accuracy level
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScalarWithStatus {
    pub value: f32,
    pub status: i8,
}

/// Event payload. Which shape is present follows from the sensor type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventPayload {
    Vector(SensorVector),
    Uncalibrated(UncalibratedVector),
    Scalar(f32),
    ScalarWithStatus(ScalarWithStatus),
    /// x, y, z, w, heading accuracy
    RotationVector([f32; 5]),
    Pose6Dof([f32; 15]),
    StepCount(u64),
    Raw([f32; 16]),
}

impl EventPayload {
    pub fn vector_mut(&mut self) -> Option<&mut SensorVector> {
        match self {
            EventPayload::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn uncalibrated_mut(&mut self) -> Option<&mut UncalibratedVector> {
        match self {
            EventPayload::Uncalibrated(u) => Some(u),
            _ => None,
        }
    }

    pub fn scalar_mut(&mut self) -> Option<&mut f32> {
        match self {
            EventPayload::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn scalar_with_status_mut(&mut self) -> Option<&mut ScalarWithStatus> {
        match self {
            EventPayload::ScalarWithStatus(s) => Some(s),
            _ => None,
        }
    }

    pub fn rotation_vector_mut(&mut self) -> Option<&mut [f32; 5]> {
        match self {
            EventPayload::RotationVector(r) => Some(r),
            _ => None,
        }
    }

    pub fn pose_mut(&mut self) -> Option<&mut [f32; 15]> {
        match self {
            EventPayload::Pose6Dof(p) => Some(p),
            _ => None,
        }
    }
}

/// A single event from the HAL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    pub sensor: i32,
    pub sensor_type: SensorType,
    pub timestamp: i64,  // ns, boot clock
    pub payload: EventPayload,
}

impl SensorEvent {
    pub fn new(
        sensor: i32,
        sensor_type: SensorType,
        timestamp: i64,
        payload: EventPayload,
    ) -> Self {
        Self {
            sensor,
            sensor_type,
            timestamp,
            payload,
        }
    }
}
