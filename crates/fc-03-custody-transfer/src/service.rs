//! # Custody Service
//!
//! Client-side flow for any custodian: check the recipient locally, submit
//! `transferOwnership`, await confirmation.

use crate::domain::{invariant_distinct_recipient, CustodyState};
use crate::ports::CustodyTransferApi;
use async_trait::async_trait;
use shared_types::{
    decode_batch_history, BatchId, Confirmation, ConfirmationPolicy, Identity, LedgerError,
    RetryOutcome, Role, SupplyChainLedger,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Success line shown after custody moves to a holder of `role`.
pub fn transferred_message(role: Role) -> String {
    format!("Transferred to {role}!")
}

/// Custody transfers on behalf of one custodian.
pub struct CustodyService<L: SupplyChainLedger> {
    ledger: Arc<L>,
    signer: Identity,
    policy: ConfirmationPolicy,
}

impl<L: SupplyChainLedger> CustodyService<L> {
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
impl<L: SupplyChainLedger> CustodyTransferApi for CustodyService<L> {
    async fn transfer(
        &self,
        id: BatchId,
        next_owner: Identity,
    ) -> Result<Confirmation, LedgerError> {
        if let Err(err) = invariant_distinct_recipient(self.signer, next_owner) {
            warn!(batch = %id, recipient = %next_owner, error = %err, "Transfer rejected locally");
            return Err(err);
        }

        let pending = self
            .ledger
            .transfer_ownership(self.signer, id, next_owner)
            .await
            .inspect_err(|err| {
                warn!(batch = %id, signer = %self.signer, recipient = %next_owner, error = %err, "Transfer rejected");
            })?;

        debug!(batch = %id, tx_id = %pending.tx_id(), "Awaiting transfer confirmation");
        let confirmation = pending.wait_for(&self.policy).await?;
        if confirmation.is_committed() {
            info!(batch = %id, from = %self.signer, to = %next_owner, "Custody transferred");
        }
        Ok(confirmation)
    }

    async fn retry_transfer(
        &self,
        id: BatchId,
        next_owner: Identity,
    ) -> Result<RetryOutcome, LedgerError> {
        let record = decode_batch_history(&self.ledger.get_batch_history(id).await?)?;

        if record.current_owner == next_owner {
            debug!(batch = %id, "Transfer already on the ledger, skipping resubmission");
            return Ok(RetryOutcome::AlreadyApplied);
        }
        if record.current_owner != self.signer {
            warn!(batch = %id, owner = %record.current_owner, "Custody moved elsewhere, refusing resubmission");
            return Err(LedgerError::not_authorized(self.signer, "transfer custody"));
        }

        self.transfer(id, next_owner).await.map(RetryOutcome::Submitted)
    }

    async fn custody_state(&self, id: BatchId) -> Result<CustodyState, LedgerError> {
        let record = decode_batch_history(&self.ledger.get_batch_history(id).await?)?;
        let owner_role = self.ledger.role_of(record.current_owner).await?;
        CustodyState::from_holder(owner_role, record.is_finalized).ok_or_else(|| {
            LedgerError::MalformedRecord(format!(
                "owner {} of batch {id} holds no custody role",
                record.current_owner
            ))
        })
    }
}
