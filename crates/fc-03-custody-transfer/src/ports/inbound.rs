//! # Inbound Ports
//!
//! What a custodian can do with a batch it holds.

use crate::domain::CustodyState;
use async_trait::async_trait;
use shared_types::{BatchId, Confirmation, Identity, LedgerError, RetryOutcome};

/// Custody transfer API - inbound port.
#[async_trait]
pub trait CustodyTransferApi: Send + Sync {
    /// Hand batch `id` to `next_owner`.
    async fn transfer(&self, id: BatchId, next_owner: Identity)
        -> Result<Confirmation, LedgerError>;

    /// Resubmit an unconfirmed transfer after re-reading custody.
    async fn retry_transfer(
        &self,
        id: BatchId,
        next_owner: Identity,
    ) -> Result<RetryOutcome, LedgerError>;

    /// Current position of batch `id` in the chain.
    async fn custody_state(&self, id: BatchId) -> Result<CustodyState, LedgerError>;
}
