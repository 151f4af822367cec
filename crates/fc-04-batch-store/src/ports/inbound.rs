//! # Inbound Ports
//!
//! Creating and finalizing batches.

use async_trait::async_trait;
use shared_types::{BatchId, Confirmation, LedgerError};

/// Batch lifecycle API - inbound port.
#[async_trait]
pub trait BatchLifecycleApi: Send + Sync {
    /// Create batch `id`; the signer becomes producer and first owner.
    async fn create_batch(
        &self,
        id: BatchId,
        name: &str,
        quantity: u64,
    ) -> Result<Confirmation, LedgerError>;

    /// Close batch `id` with the inspection outcome.
    async fn finalize(&self, id: BatchId, passed_inspection: bool)
        -> Result<Confirmation, LedgerError>;
}
