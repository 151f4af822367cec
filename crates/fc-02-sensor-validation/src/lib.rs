//! # FC-02 Sensor Log Validation
//!
//! Environmental readings for batches in transit.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! The transporter holding a batch appends temperature, humidity and
//! location readings. Two bounds apply:
//!
//! | Gate | Where | On violation |
//! |------|-------|--------------|
//! | Admissible range (temp -10..=40, humidity 0..=40) | client, before submission | `OutOfRange`, nothing sent |
//! | Cold-chain policy | ledger, on append | reading kept, batch flagged violated |
//!
//! ## Module Structure
//!
//! ```text
//! fc-02-sensor-validation/
//! ├── domain/     # SensorReading, admissible ranges, ColdChainPolicy
//! ├── ports/      # SensorLoggingApi
//! └── service.rs  # SensorService (client-side flow)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    validate_reading, ColdChainPolicy, SensorReading, HUMIDITY_MAX, HUMIDITY_MIN,
    TEMPERATURE_MAX, TEMPERATURE_MIN,
};
pub use ports::SensorLoggingApi;
pub use service::{recorded_message, SensorService};
