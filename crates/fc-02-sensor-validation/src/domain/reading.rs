//! # Sensor Readings
//!
//! A reading and the client-side gate applied before it is submitted.

use serde::{Deserialize, Serialize};
use shared_types::{LedgerError, SensorField};

/// Lowest admissible temperature, °C.
pub const TEMPERATURE_MIN: i64 = -10;
/// Highest admissible temperature, °C.
pub const TEMPERATURE_MAX: i64 = 40;
/// Lowest admissible relative humidity, %.
pub const HUMIDITY_MIN: i64 = 0;
/// Highest admissible relative humidity, %.
pub const HUMIDITY_MAX: i64 = 40;

/// One environmental reading as entered by a transporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Degrees Celsius.
    pub temperature: i64,
    /// Relative humidity, percent.
    pub humidity: i64,
    /// Free-text location.
    pub location: String,
}

impl SensorReading {
    /// Create a reading.
    pub fn new(temperature: i64, humidity: i64, location: impl Into<String>) -> Self {
        Self {
            temperature,
            humidity,
            location: location.into(),
        }
    }
}

fn check_range(field: SensorField, value: i64) -> Result<(), LedgerError> {
    let range = field.admissible_range();
    if range.contains(&value) {
        Ok(())
    } else {
        Err(LedgerError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Gate a reading before submission.
///
/// Temperature is checked first, then humidity, then location.
pub fn validate_reading(reading: &SensorReading) -> Result<(), LedgerError> {
    check_range(SensorField::Temperature, reading.temperature)?;
    check_range(SensorField::Humidity, reading.humidity)?;
    if reading.location.trim().is_empty() {
        return Err(LedgerError::InvalidInput(
            "location must not be blank".to_string(),
        ));
    }
    Ok(())
}
