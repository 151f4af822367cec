//! # Provenance Report
//!
//! The decoded, consumer-facing view of a batch. Built from the positional
//! tuple by [`decode_report`], which runs the shared decoder once and then
//! derives the summaries.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use shared_types::{
    decode_batch_history, BatchId, BatchRecord, Identity, LedgerError, LedgerValue, Timestamp,
};
use std::fmt;

/// Date format shown to consumers.
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

// =============================================================================
// SUMMARIES
// =============================================================================

/// Whether the batch is still moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShipmentStatus {
    /// Not finalized yet.
    InTransit,
    /// Retailer recorded the inspection.
    Finalized,
}

impl ShipmentStatus {
    fn from_record(record: &BatchRecord) -> Self {
        if record.is_finalized {
            ShipmentStatus::Finalized
        } else {
            ShipmentStatus::InTransit
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipmentStatus::InTransit => f.write_str("In Transit"),
            ShipmentStatus::Finalized => f.write_str("Finalized"),
        }
    }
}

/// Retailer inspection outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InspectionSummary {
    /// Not finalized yet.
    AwaitingApproval,
    /// Finalized and passed.
    Approved,
    /// Finalized and failed.
    Rejected,
}

impl InspectionSummary {
    fn from_record(record: &BatchRecord) -> Self {
        match (record.is_finalized, record.passed_inspection) {
            (false, _) => InspectionSummary::AwaitingApproval,
            (true, true) => InspectionSummary::Approved,
            (true, false) => InspectionSummary::Rejected,
        }
    }
}

impl fmt::Display for InspectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectionSummary::AwaitingApproval => f.write_str("Awaiting Approval"),
            InspectionSummary::Approved => f.write_str("Retailer Approved"),
            InspectionSummary::Rejected => f.write_str("Rejected at inspection"),
        }
    }
}

/// Cold-chain outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationSummary {
    /// No reading left the policy bounds.
    Ok,
    /// At least one excursion was recorded.
    QualityAlert,
}

impl fmt::Display for ViolationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationSummary::Ok => f.write_str("OK"),
            ViolationSummary::QualityAlert => f.write_str("QUALITY ALERT: Violated Limits"),
        }
    }
}

// =============================================================================
// TIME
// =============================================================================

/// A ledger timestamp ready for display.
///
/// A zero timestamp is the "no timestamp" sentinel and is never shown as the
/// Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTimestamp {
    /// The ledger never assigned a time.
    NoTimestamp,
    /// A UTC instant.
    At(DateTime<Utc>),
}

impl From<Timestamp> for DisplayTimestamp {
    fn from(ts: Timestamp) -> Self {
        if !ts.is_set() {
            return DisplayTimestamp::NoTimestamp;
        }
        i64::try_from(ts.secs())
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(DisplayTimestamp::At)
            .unwrap_or(DisplayTimestamp::NoTimestamp)
    }
}

impl fmt::Display for DisplayTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayTimestamp::NoTimestamp => f.write_str("N/A"),
            DisplayTimestamp::At(at) => write!(f, "{}", at.format(DISPLAY_FORMAT)),
        }
    }
}

impl Serialize for DisplayTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// Most recent sensor reading, or the "no data" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LatestReading {
    /// The batch has no sensor logs.
    NoData,
    /// The last appended log.
    Reading {
        /// Degrees Celsius.
        temperature: i64,
        /// Relative humidity, percent.
        humidity: i64,
        /// Free-text location.
        location: String,
        /// Transporter that appended it.
        recorded_by: Identity,
        /// When it was appended.
        recorded_at: DisplayTimestamp,
    },
}

/// One hand-off in the custody chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustodyStep {
    /// Custodian from this point on.
    pub identity: Identity,
    /// When custody changed.
    pub at: DisplayTimestamp,
}

/// Everything a consumer sees about a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvenanceReport {
    /// Queried batch.
    pub batch_id: BatchId,
    /// Product name.
    pub name: String,
    /// Quantity in kilograms.
    pub quantity: u64,
    /// Creator.
    pub producer: Identity,
    /// Current custodian.
    pub current_owner: Identity,
    /// In transit or finalized.
    pub status: ShipmentStatus,
    /// Retailer inspection outcome.
    pub inspection: InspectionSummary,
    /// Cold-chain outcome.
    pub violation: ViolationSummary,
    /// Last sensor reading.
    pub latest_reading: LatestReading,
    /// Every hand-off, oldest first.
    pub custody_chain: Vec<CustodyStep>,
}

impl ProvenanceReport {
    /// Derive the report from a decoded record.
    pub fn from_record(batch_id: BatchId, record: &BatchRecord) -> Self {
        let latest_reading = match record.latest_sensor_log() {
            None => LatestReading::NoData,
            Some(log) => LatestReading::Reading {
                temperature: log.temperature,
                humidity: log.humidity,
                location: log.location.clone(),
                recorded_by: log.recorded_by,
                recorded_at: log.timestamp.into(),
            },
        };

        let violation = if record.is_violated {
            ViolationSummary::QualityAlert
        } else {
            ViolationSummary::Ok
        };

        Self {
            batch_id,
            name: record.name.clone(),
            quantity: record.quantity,
            producer: record.producer,
            current_owner: record.current_owner,
            status: ShipmentStatus::from_record(record),
            inspection: InspectionSummary::from_record(record),
            violation,
            latest_reading,
            custody_chain: record
                .ownership_history
                .iter()
                .map(|entry| CustodyStep {
                    identity: entry.identity,
                    at: entry.timestamp.into(),
                })
                .collect(),
        }
    }

    /// Pretty JSON export.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Decode the raw ledger tuple for batch `id` into a report.
pub fn decode_report(id: BatchId, raw: &[LedgerValue]) -> Result<ProvenanceReport, LedgerError> {
    let record = decode_batch_history(raw)?;
    Ok(ProvenanceReport::from_record(id, &record))
}

/// The customer card.
impl fmt::Display for ProvenanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Batch {} - {}", self.batch_id, self.name)?;
        writeln!(f, "Quantity: {} kg", self.quantity)?;
        writeln!(f, "Producer: {}", self.producer)?;
        writeln!(f, "Current Owner: {}", self.current_owner)?;
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Quality Check: {}", self.violation)?;
        writeln!(f, "Retailer Check: {}", self.inspection)?;
        writeln!(f, "Latest Sensor Data:")?;
        match &self.latest_reading {
            LatestReading::NoData => {
                writeln!(f, "  Temperature: -")?;
                writeln!(f, "  Humidity: -")?;
                writeln!(f, "  Location: Unknown")?;
                writeln!(f, "  Time: {}", DisplayTimestamp::NoTimestamp)?;
            }
            LatestReading::Reading {
                temperature,
                humidity,
                location,
                recorded_at,
                ..
            } => {
                writeln!(f, "  Temperature: {temperature}°C")?;
                writeln!(f, "  Humidity: %{humidity}")?;
                writeln!(f, "  Location: {location}")?;
                writeln!(f, "  Time: {recorded_at}")?;
            }
        }
        writeln!(f, "Custody Chain:")?;
        for (i, step) in self.custody_chain.iter().enumerate() {
            writeln!(f, "  {}. {} at {}", i + 1, step.identity, step.at)?;
        }
        Ok(())
    }
}
