//! # Core Domain Entities
//!
//! Defines the entities every FreshChain participant agrees on.
//!
//! ## Clusters
//!
//! - **Participants**: `Identity`, `Role`, `Capability`
//! - **Batches**: `BatchId`, `Timestamp`, `BatchRecord`
//! - **History**: `CustodyEntry`, `SensorLog`

use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: PARTICIPANTS
// =============================================================================

/// A 20-byte participant address.
///
/// Rendered and parsed as `0x`-prefixed lowercase hex. The all-zero address
/// never identifies a participant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Identity(pub [u8; 20]);

impl Identity {
    /// The all-zero address.
    pub const ZERO: Identity = Identity([0u8; 20]);

    /// Build an identity whose low eight bytes hold `value` (big-endian).
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this is the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({self})")
    }
}

impl FromStr for Identity {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let bytes = hex::decode(digits)
            .map_err(|e| LedgerError::InvalidInput(format!("invalid address '{s}': {e}")))?;

        let bytes: [u8; 20] = bytes.try_into().map_err(|raw: Vec<u8>| {
            LedgerError::InvalidInput(format!(
                "invalid address '{s}': expected 20 bytes, got {}",
                raw.len()
            ))
        })?;

        Ok(Self(bytes))
    }
}

/// Something a role is allowed to do on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Grant roles to other identities.
    RegisterParticipants,
    /// Create a new batch.
    CreateBatch,
    /// Append sensor readings to a batch in custody.
    RecordSensorData,
    /// Hand custody to the next role in the chain.
    TransferCustody,
    /// Close the chain with an inspection outcome.
    FinalizeBatch,
}

/// The closed set of participant roles.
///
/// Custody always moves along Producer → Transporter → Distributor →
/// Retailer; `next_custodian` is the single place that rule lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Ledger deployer; registers everyone else.
    Admin,
    /// Grows the goods and creates batches.
    Producer,
    /// Moves goods and records environmental readings.
    Transporter,
    /// Wholesale hand-off between transport and retail.
    Distributor,
    /// Receives goods and performs the final inspection.
    Retailer,
}

impl Role {
    /// Roles that Admin may grant.
    pub const ASSIGNABLE: [Role; 4] = [
        Role::Producer,
        Role::Transporter,
        Role::Distributor,
        Role::Retailer,
    ];

    /// Capabilities authorized by this role.
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Role::Admin => &[Capability::RegisterParticipants],
            Role::Producer => &[Capability::CreateBatch, Capability::TransferCustody],
            Role::Transporter => &[Capability::RecordSensorData, Capability::TransferCustody],
            Role::Distributor => &[Capability::TransferCustody],
            Role::Retailer => &[Capability::FinalizeBatch],
        }
    }

    /// Whether this role authorizes `capability`.
    pub fn allows(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// The role that must receive custody from this one, if any.
    pub fn next_custodian(&self) -> Option<Role> {
        match self {
            Role::Producer => Some(Role::Transporter),
            Role::Transporter => Some(Role::Distributor),
            Role::Distributor => Some(Role::Retailer),
            Role::Retailer | Role::Admin => None,
        }
    }

    /// Position in the custody chain (Producer = 0), `None` for Admin.
    pub fn custody_rank(&self) -> Option<usize> {
        match self {
            Role::Admin => None,
            Role::Producer => Some(0),
            Role::Transporter => Some(1),
            Role::Distributor => Some(2),
            Role::Retailer => Some(3),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "Admin",
            Role::Producer => "Producer",
            Role::Transporter => "Transporter",
            Role::Distributor => "Distributor",
            Role::Retailer => "Retailer",
        };
        f.write_str(name)
    }
}

impl FromStr for Role {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "producer" => Ok(Role::Producer),
            "transporter" => Ok(Role::Transporter),
            "distributor" => Ok(Role::Distributor),
            "retailer" => Ok(Role::Retailer),
            other => Err(LedgerError::InvalidInput(format!("unknown role '{other}'"))),
        }
    }
}

// =============================================================================
// CLUSTER B: BATCHES
// =============================================================================

/// Positive batch identifier chosen by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct BatchId(u64);

impl BatchId {
    /// Validate a raw identifier; zero is not a batch.
    pub fn new(raw: u64) -> Result<Self, LedgerError> {
        if raw == 0 {
            return Err(LedgerError::InvalidInput(
                "batch id must be a positive integer".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    /// The raw integer.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for BatchId {
    type Error = LedgerError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<BatchId> for u64 {
    fn from(id: BatchId) -> Self {
        id.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ledger-assigned time in seconds since the Unix epoch.
///
/// Zero means the ledger never assigned one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// The "never assigned" value.
    pub const UNSET: Timestamp = Timestamp(0);

    /// Seconds since epoch.
    pub fn secs(&self) -> u64 {
        self.0
    }

    /// Whether the ledger assigned this timestamp.
    pub fn is_set(&self) -> bool {
        self.0 > 0
    }
}

/// Which environmental channel a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorField {
    /// Degrees Celsius.
    Temperature,
    /// Relative humidity, percent.
    Humidity,
}

impl SensorField {
    /// Inclusive range a reading must fall in to be submitted.
    pub fn admissible_range(&self) -> RangeInclusive<i64> {
        match self {
            SensorField::Temperature => -10..=40,
            SensorField::Humidity => 0..=40,
        }
    }
}

impl fmt::Display for SensorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorField::Temperature => f.write_str("Temperature"),
            SensorField::Humidity => f.write_str("Humidity"),
        }
    }
}

// =============================================================================
// CLUSTER C: HISTORY
// =============================================================================

/// One custody change: who took the batch, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyEntry {
    /// The identity that holds custody from this point on.
    pub identity: Identity,
    /// When the ledger recorded the hand-off.
    pub timestamp: Timestamp,
}

/// One environmental reading appended by a transporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorLog {
    /// Ledger-assigned time of the append.
    pub timestamp: Timestamp,
    /// Degrees Celsius.
    pub temperature: i64,
    /// Relative humidity, percent.
    pub humidity: i64,
    /// Free-text location.
    pub location: String,
    /// The transporter that appended the reading.
    pub recorded_by: Identity,
}

/// The full ledger record of a batch, with named fields.
///
/// Produced by [`crate::wire::decode_batch_history`] from the positional
/// tuple the ledger returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// Product name.
    pub name: String,
    /// Quantity in kilograms.
    pub quantity: u64,
    /// Creator of the batch.
    pub producer: Identity,
    /// Identity holding custody now.
    pub current_owner: Identity,
    /// Set once by the retailer; terminal.
    pub is_finalized: bool,
    /// Inspection outcome recorded at finalization.
    pub passed_inspection: bool,
    /// Whether any reading left the cold-chain policy bounds.
    pub is_violated: bool,
    /// Every custody change, oldest first.
    pub ownership_history: Vec<CustodyEntry>,
    /// Every sensor reading, in append order.
    pub sensor_logs: Vec<SensorLog>,
}

impl BatchRecord {
    /// Most recently appended sensor reading.
    pub fn latest_sensor_log(&self) -> Option<&SensorLog> {
        self.sensor_logs.last()
    }
}
