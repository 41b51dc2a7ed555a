//! Sensor module - HAL sensor types and sample requantization

mod quantize;
mod resolution;
mod types;

pub use quantize::{
    quantize_sensor_event_values, quantize_value, quantize_value_with_factor, PayloadQuantization,
    Quantizer, DEFAULT_QUANTIZATION_FACTOR,
};
pub use resolution::{
    resolution_for_sensor, ResolutionMap, ResolutionRule, ResolutionTable, EVENT_SENSOR_RESOLUTION,
};
pub use types::{
    EventPayload, ScalarWithStatus, SensorDescriptor, SensorEvent, SensorType, SensorVector,
    UncalibratedVector,
};
