//! # Sensor Service
//!
//! Client-side flow for a transporter: gate the reading, submit
//! `addSensorData`, await confirmation. Resubmission re-reads the batch first.

use crate::domain::{validate_reading, SensorReading};
use crate::ports::SensorLoggingApi;
use async_trait::async_trait;
use shared_types::{
    decode_batch_history, BatchId, BatchRecord, Confirmation, ConfirmationPolicy, Identity,
    LedgerError, RetryOutcome, SupplyChainLedger,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Success line shown after a reading commits.
pub fn recorded_message(reading: &SensorReading) -> String {
    format!(
        "Data Added! ({}°C, %{})",
        reading.temperature, reading.humidity
    )
}

/// Sensor logging on behalf of one transporter.
pub struct SensorService<L: SupplyChainLedger> {
    ledger: Arc<L>,
    signer: Identity,
    policy: ConfirmationPolicy,
}

impl<L: SupplyChainLedger> SensorService<L> {
    /// Create a service that signs as `signer`.
    pub fn new(ledger: Arc<L>, signer: Identity, policy: ConfirmationPolicy) -> Self {
        Self {
            ledger,
            signer,
            policy,
        }
    }

    /// Number of sensor logs batch `id` currently holds.
    pub async fn log_count(&self, id: BatchId) -> Result<usize, LedgerError> {
        Ok(self.current_record(id).await?.sensor_logs.len())
    }

    async fn current_record(&self, id: BatchId) -> Result<BatchRecord, LedgerError> {
        let raw = self.ledger.get_batch_history(id).await?;
        decode_batch_history(&raw)
    }

    fn is_visible(&self, record: &BatchRecord, reading: &SensorReading, baseline: usize) -> bool {
        record.sensor_logs.iter().skip(baseline).any(|log| {
            log.recorded_by == self.signer
                && log.temperature == reading.temperature
                && log.humidity == reading.humidity
                && log.location == reading.location
        })
    }
}

#[async_trait]
impl<L: SupplyChainLedger> SensorLoggingApi for SensorService<L> {
    async fn record(
        &self,
        id: BatchId,
        reading: SensorReading,
    ) -> Result<Confirmation, LedgerError> {
        if let Err(err) = validate_reading(&reading) {
            warn!(
                batch = %id,
                temperature = reading.temperature,
                humidity = reading.humidity,
                error = %err,
                "Sensor reading rejected before submission"
            );
            return Err(err);
        }

        let pending = self
            .ledger
            .add_sensor_data(
                self.signer,
                id,
                reading.temperature,
                reading.humidity,
                &reading.location,
            )
            .await
            .inspect_err(|err| {
                warn!(batch = %id, signer = %self.signer, error = %err, "Sensor data rejected");
            })?;

        debug!(batch = %id, tx_id = %pending.tx_id(), "Awaiting sensor data confirmation");
        let confirmation = pending.wait_for(&self.policy).await?;
        if confirmation.is_committed() {
            info!(
                batch = %id,
                temperature = reading.temperature,
                humidity = reading.humidity,
                location = %reading.location,
                "Sensor data recorded"
            );
        }
        Ok(confirmation)
    }

    async fn retry(
        &self,
        id: BatchId,
        reading: SensorReading,
        baseline_log_count: usize,
    ) -> Result<RetryOutcome, LedgerError> {
        let record = self.current_record(id).await?;

        if self.is_visible(&record, &reading, baseline_log_count) {
            debug!(batch = %id, "Sensor reading already on the ledger, skipping resubmission");
            return Ok(RetryOutcome::AlreadyApplied);
        }
        if record.is_finalized {
            return Err(LedgerError::invalid_state(id, "batch is finalized"));
        }
        if record.current_owner != self.signer {
            warn!(batch = %id, owner = %record.current_owner, "Custody moved, refusing resubmission");
            return Err(LedgerError::not_authorized(self.signer, "record sensor data"));
        }

        self.record(id, reading).await.map(RetryOutcome::Submitted)
    }
}
