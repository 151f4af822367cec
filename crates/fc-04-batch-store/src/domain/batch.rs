//! # Batch Entity
//!
//! A batch as the ledger holds it. Mutators assume the ledger already
//! checked authorization; they only maintain the record's own invariants:
//! histories are append-only, `is_violated` never clears, and nothing
//! changes after finalization.

use shared_types::{
    BatchId, BatchRecord, CustodyEntry, Identity, LedgerError, SensorLog, Timestamp,
};

/// Check the caller-supplied fields of a new batch.
pub fn validate_batch_fields(name: &str, quantity: u64) -> Result<(), LedgerError> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidInput(
            "batch name must not be blank".to_string(),
        ));
    }
    if quantity == 0 {
        return Err(LedgerError::InvalidInput(
            "quantity must be positive".to_string(),
        ));
    }
    Ok(())
}

/// A stored batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    id: BatchId,
    name: String,
    quantity: u64,
    producer: Identity,
    current_owner: Identity,
    is_finalized: bool,
    passed_inspection: bool,
    is_violated: bool,
    ownership_history: Vec<CustodyEntry>,
    sensor_logs: Vec<SensorLog>,
}

impl Batch {
    /// A fresh batch owned by `producer`, with `(producer, now)` as the first
    /// custody entry.
    pub fn create(
        id: BatchId,
        name: &str,
        quantity: u64,
        producer: Identity,
        now: Timestamp,
    ) -> Result<Self, LedgerError> {
        validate_batch_fields(name, quantity)?;

        Ok(Self {
            id,
            name: name.to_string(),
            quantity,
            producer,
            current_owner: producer,
            is_finalized: false,
            passed_inspection: false,
            is_violated: false,
            ownership_history: vec![CustodyEntry {
                identity: producer,
                timestamp: now,
            }],
            sensor_logs: Vec::new(),
        })
    }

    /// Batch identifier.
    pub fn id(&self) -> BatchId {
        self.id
    }

    /// Identity holding custody.
    pub fn current_owner(&self) -> Identity {
        self.current_owner
    }

    /// Whether the batch was finalized.
    pub fn is_finalized(&self) -> bool {
        self.is_finalized
    }

    /// Whether any reading was an excursion.
    pub fn is_violated(&self) -> bool {
        self.is_violated
    }

    /// Custody entries, oldest first.
    pub fn ownership_history(&self) -> &[CustodyEntry] {
        &self.ownership_history
    }

    /// Sensor logs, in append order.
    pub fn sensor_logs(&self) -> &[SensorLog] {
        &self.sensor_logs
    }

    fn ensure_open(&self) -> Result<(), LedgerError> {
        if self.is_finalized {
            return Err(LedgerError::invalid_state(self.id, "batch is finalized"));
        }
        Ok(())
    }

    /// Append a reading; `excursion` flags the batch for good.
    pub fn append_sensor_log(&mut self, log: SensorLog, excursion: bool) -> Result<(), LedgerError> {
        self.ensure_open()?;
        self.sensor_logs.push(log);
        self.is_violated |= excursion;
        Ok(())
    }

    /// Move custody to `next_owner`.
    pub fn transfer_to(&mut self, next_owner: Identity, now: Timestamp) -> Result<(), LedgerError> {
        self.ensure_open()?;
        self.current_owner = next_owner;
        self.ownership_history.push(CustodyEntry {
            identity: next_owner,
            timestamp: now,
        });
        Ok(())
    }

    /// Record the inspection outcome and close the batch.
    pub fn finalize(&mut self, passed_inspection: bool) -> Result<(), LedgerError> {
        self.ensure_open()?;
        self.is_finalized = true;
        self.passed_inspection = passed_inspection;
        Ok(())
    }

    /// The named-field view served to readers.
    pub fn to_record(&self) -> BatchRecord {
        BatchRecord {
            name: self.name.clone(),
            quantity: self.quantity,
            producer: self.producer,
            current_owner: self.current_owner,
            is_finalized: self.is_finalized,
            passed_inspection: self.passed_inspection,
            is_violated: self.is_violated,
            ownership_history: self.ownership_history.clone(),
            sensor_logs: self.sensor_logs.clone(),
        }
    }
}
