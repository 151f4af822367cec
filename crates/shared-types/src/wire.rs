//! # Ledger Wire Format
//!
//! The ledger answers `getBatchHistory` with an untagged positional tuple.
//! `decode_batch_history` is the only place that knows which index holds
//! which field; everything downstream works with [`BatchRecord`].
//!
//! ```text
//! [0] name              Text
//! [1] quantity          Uint
//! [2] producer          Address
//! [3] currentOwner      Address
//! [4] isFinalized       Bool
//! [5] passedInspection  Bool
//! [6] isViolated        Bool
//! [7] ownershipHistory  List<Tuple(identity, timestamp)>
//! [8] sensorLogs        List<Tuple(timestamp, temperature, humidity, location, recordedBy)>
//! ```

use crate::entities::{BatchRecord, CustodyEntry, Identity, SensorLog, Timestamp};
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};

/// Field positions in the batch tuple.
pub mod batch_fields {
    pub const NAME: usize = 0;
    pub const QUANTITY: usize = 1;
    pub const PRODUCER: usize = 2;
    pub const CURRENT_OWNER: usize = 3;
    pub const IS_FINALIZED: usize = 4;
    pub const PASSED_INSPECTION: usize = 5;
    pub const IS_VIOLATED: usize = 6;
    pub const OWNERSHIP_HISTORY: usize = 7;
    pub const SENSOR_LOGS: usize = 8;
    pub const LEN: usize = 9;
}

/// Field positions in a sensor log tuple.
pub mod sensor_fields {
    pub const TIMESTAMP: usize = 0;
    pub const TEMPERATURE: usize = 1;
    pub const HUMIDITY: usize = 2;
    pub const LOCATION: usize = 3;
    pub const RECORDED_BY: usize = 4;
    pub const LEN: usize = 5;
}

/// Field positions in a custody entry tuple.
pub mod custody_fields {
    pub const IDENTITY: usize = 0;
    pub const TIMESTAMP: usize = 1;
    pub const LEN: usize = 2;
}

/// An untagged value as the ledger returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerValue {
    Uint(u64),
    Int(i64),
    Bool(bool),
    Text(String),
    Address(Identity),
    List(Vec<LedgerValue>),
    Tuple(Vec<LedgerValue>),
}

impl LedgerValue {
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            LedgerValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Signed view; an unsigned value is accepted when it fits.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            LedgerValue::Int(v) => Some(*v),
            LedgerValue::Uint(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Seconds since the epoch; a signed value is accepted when non-negative.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            LedgerValue::Uint(v) => Some(Timestamp(*v)),
            LedgerValue::Int(v) => u64::try_from(*v).ok().map(Timestamp),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LedgerValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LedgerValue::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Identity> {
        match self {
            LedgerValue::Address(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[LedgerValue]> {
        match self {
            LedgerValue::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[LedgerValue]> {
        match self {
            LedgerValue::Tuple(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

// =============================================================================
// ENCODE
// =============================================================================

/// Lay a record out in ledger tuple order.
pub fn encode_batch_history(record: &BatchRecord) -> Vec<LedgerValue> {
    let history = record
        .ownership_history
        .iter()
        .map(|entry| {
            LedgerValue::Tuple(vec![
                LedgerValue::Address(entry.identity),
                LedgerValue::Uint(entry.timestamp.secs()),
            ])
        })
        .collect();

    let logs = record
        .sensor_logs
        .iter()
        .map(|log| {
            LedgerValue::Tuple(vec![
                LedgerValue::Uint(log.timestamp.secs()),
                LedgerValue::Int(log.temperature),
                LedgerValue::Int(log.humidity),
                LedgerValue::Text(log.location.clone()),
                LedgerValue::Address(log.recorded_by),
            ])
        })
        .collect();

    vec![
        LedgerValue::Text(record.name.clone()),
        LedgerValue::Uint(record.quantity),
        LedgerValue::Address(record.producer),
        LedgerValue::Address(record.current_owner),
        LedgerValue::Bool(record.is_finalized),
        LedgerValue::Bool(record.passed_inspection),
        LedgerValue::Bool(record.is_violated),
        LedgerValue::List(history),
        LedgerValue::List(logs),
    ]
}

// =============================================================================
// DECODE
// =============================================================================

fn malformed(what: &str, index: usize) -> LedgerError {
    LedgerError::MalformedRecord(format!("field [{index}] is not a valid {what}"))
}

fn field<'a>(values: &'a [LedgerValue], index: usize) -> Result<&'a LedgerValue, LedgerError> {
    values
        .get(index)
        .ok_or_else(|| LedgerError::MalformedRecord(format!("missing field [{index}]")))
}

fn decode_custody_entry(value: &LedgerValue) -> Result<CustodyEntry, LedgerError> {
    let parts = value
        .as_tuple()
        .filter(|parts| parts.len() == custody_fields::LEN)
        .ok_or_else(|| LedgerError::MalformedRecord("custody entry shape".to_string()))?;

    Ok(CustodyEntry {
        identity: parts[custody_fields::IDENTITY]
            .as_address()
            .ok_or_else(|| malformed("custody identity", custody_fields::IDENTITY))?,
        timestamp: parts[custody_fields::TIMESTAMP]
            .as_timestamp()
            .ok_or_else(|| malformed("custody timestamp", custody_fields::TIMESTAMP))?,
    })
}

fn decode_sensor_log(value: &LedgerValue) -> Result<SensorLog, LedgerError> {
    let parts = value
        .as_tuple()
        .filter(|parts| parts.len() == sensor_fields::LEN)
        .ok_or_else(|| LedgerError::MalformedRecord("sensor log shape".to_string()))?;

    Ok(SensorLog {
        timestamp: parts[sensor_fields::TIMESTAMP]
            .as_timestamp()
            .ok_or_else(|| malformed("sensor timestamp", sensor_fields::TIMESTAMP))?,
        temperature: parts[sensor_fields::TEMPERATURE]
            .as_int()
            .ok_or_else(|| malformed("temperature", sensor_fields::TEMPERATURE))?,
        humidity: parts[sensor_fields::HUMIDITY]
            .as_int()
            .ok_or_else(|| malformed("humidity", sensor_fields::HUMIDITY))?,
        location: parts[sensor_fields::LOCATION]
            .as_text()
            .ok_or_else(|| malformed("location", sensor_fields::LOCATION))?
            .to_string(),
        recorded_by: parts[sensor_fields::RECORDED_BY]
            .as_address()
            .ok_or_else(|| malformed("recorder", sensor_fields::RECORDED_BY))?,
    })
}

/// Turn the positional ledger tuple into a named record.
///
/// Extra trailing fields are rejected along with missing ones.
pub fn decode_batch_history(values: &[LedgerValue]) -> Result<BatchRecord, LedgerError> {
    use batch_fields::*;

    if values.len() != LEN {
        return Err(LedgerError::MalformedRecord(format!(
            "expected {LEN} fields, got {}",
            values.len()
        )));
    }

    let ownership_history = field(values, OWNERSHIP_HISTORY)?
        .as_list()
        .ok_or_else(|| malformed("ownership history", OWNERSHIP_HISTORY))?
        .iter()
        .map(decode_custody_entry)
        .collect::<Result<Vec<_>, _>>()?;

    let sensor_logs = field(values, SENSOR_LOGS)?
        .as_list()
        .ok_or_else(|| malformed("sensor log list", SENSOR_LOGS))?
        .iter()
        .map(decode_sensor_log)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BatchRecord {
        name: field(values, NAME)?
            .as_text()
            .ok_or_else(|| malformed("name", NAME))?
            .to_string(),
        quantity: field(values, QUANTITY)?
            .as_uint()
            .ok_or_else(|| malformed("quantity", QUANTITY))?,
        producer: field(values, PRODUCER)?
            .as_address()
            .ok_or_else(|| malformed("producer", PRODUCER))?,
        current_owner: field(values, CURRENT_OWNER)?
            .as_address()
            .ok_or_else(|| malformed("current owner", CURRENT_OWNER))?,
        is_finalized: field(values, IS_FINALIZED)?
            .as_bool()
            .ok_or_else(|| malformed("finalized flag", IS_FINALIZED))?,
        passed_inspection: field(values, PASSED_INSPECTION)?
            .as_bool()
            .ok_or_else(|| malformed("inspection flag", PASSED_INSPECTION))?,
        is_violated: field(values, IS_VIOLATED)?
            .as_bool()
            .ok_or_else(|| malformed("violation flag", IS_VIOLATED))?,
        ownership_history,
        sensor_logs,
    })
}
