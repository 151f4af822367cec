//! # Inbound Ports
//!
//! What a transporter can do with sensor logs.

use crate::domain::SensorReading;
use async_trait::async_trait;
use shared_types::{BatchId, Confirmation, LedgerError, RetryOutcome};

/// Sensor logging API - inbound port.
#[async_trait]
pub trait SensorLoggingApi: Send + Sync {
    /// Gate `reading` locally, then append it to batch `id`.
    async fn record(&self, id: BatchId, reading: SensorReading)
        -> Result<Confirmation, LedgerError>;

    /// Resubmit an unconfirmed reading.
    ///
    /// `baseline_log_count` is the number of sensor logs the batch had
    /// before the first submission.
    async fn retry(
        &self,
        id: BatchId,
        reading: SensorReading,
        baseline_log_count: usize,
    ) -> Result<RetryOutcome, LedgerError>;
}
