//! # Batch Service
//!
//! Client-side flows for the two ends of the chain: a producer creating a
//! batch and a retailer finalizing it.

use crate::domain::validate_batch_fields;
use crate::ports::BatchLifecycleApi;
use async_trait::async_trait;
use shared_types::{
    BatchId, Confirmation, ConfirmationPolicy, Identity, LedgerError, SupplyChainLedger,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Success line shown after a batch is created.
pub fn created_message(id: BatchId) -> String {
    format!("Batch {id} created successfully!")
}

/// Success line shown after the retailer records the inspection.
pub fn finalized_message(passed_inspection: bool) -> &'static str {
    if passed_inspection {
        "Product Approved and Placed on Shelf!"
    } else {
        "Product Rejected at Inspection."
    }
}

/// Batch lifecycle on behalf of one signer.
pub struct BatchService<L: SupplyChainLedger> {
    ledger: Arc<L>,
    signer: Identity,
    policy: ConfirmationPolicy,
}

impl<L: SupplyChainLedger> BatchService<L> {
    /// Create a service that signs as `signer`.
    pub fn new(ledger: Arc<L>, signer: Identity, policy: ConfirmationPolicy) -> Self {
        Self {
            ledger,
            signer,
            policy,
        }
    }
}

#[async_trait]
impl<L: SupplyChainLedger> BatchLifecycleApi for BatchService<L> {
    async fn create_batch(
        &self,
        id: BatchId,
        name: &str,
        quantity: u64,
    ) -> Result<Confirmation, LedgerError> {
        if let Err(err) = validate_batch_fields(name, quantity) {
            warn!(batch = %id, error = %err, "Batch creation rejected locally");
            return Err(err);
        }

        // Not idempotent: a resubmission of a committed create fails with DuplicateId.
        let pending = self
            .ledger
            .create_batch(self.signer, id, name, quantity)
            .await
            .inspect_err(|err| {
                warn!(batch = %id, signer = %self.signer, error = %err, "Batch creation rejected");
            })?;

        debug!(batch = %id, tx_id = %pending.tx_id(), "Awaiting creation confirmation");
        let confirmation = pending.wait_for(&self.policy).await?;
        if confirmation.is_committed() {
            info!(batch = %id, product = name, quantity, producer = %self.signer, "Batch created");
        }
        Ok(confirmation)
    }

    async fn finalize(
        &self,
        id: BatchId,
        passed_inspection: bool,
    ) -> Result<Confirmation, LedgerError> {
        let pending = self
            .ledger
            .mark_as_arrived(self.signer, id, passed_inspection)
            .await
            .inspect_err(|err| {
                warn!(batch = %id, signer = %self.signer, error = %err, "Finalization rejected");
            })?;

        let confirmation = pending.wait_for(&self.policy).await?;
        if confirmation.is_committed() {
            info!(batch = %id, passed_inspection, "Batch finalized");
        }
        Ok(confirmation)
    }
}
