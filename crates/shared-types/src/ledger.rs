//! # Ledger Contract
//!
//! The shared ledger as every participant sees it. Each state-changing call is
//! signed by one identity and answers with a [`PendingTx`]; the ledger checks
//! authorization and state atomically per call.
//!
//! `createBatch` checks the Producer role (`NotAuthorized`), then the id
//! (`DuplicateId`). Calls on an existing batch check, in order:
//!
//! 1. batch exists (`NotFound`)
//! 2. batch not finalized (`InvalidState`)
//! 3. signer ownership and role (`NotAuthorized`)
//! 4. call-specific checks (`InvalidRoleTransition`)
//!
//! Every call fails with `Connectivity` when the ledger cannot be reached.

use crate::entities::{BatchId, Identity, Role};
use crate::errors::LedgerError;
use crate::pending::PendingTx;
use crate::wire::LedgerValue;
use async_trait::async_trait;

/// Operations offered by the FreshChain ledger.
#[async_trait]
pub trait SupplyChainLedger: Send + Sync {
    // ===== Registration (Admin only) =====

    async fn register_producer(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError>;

    async fn register_transporter(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError>;

    async fn register_distributor(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError>;

    async fn register_retailer(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError>;

    // ===== Batch lifecycle =====

    /// Producer creates a batch it initially owns.
    async fn create_batch(
        &self,
        signer: Identity,
        id: BatchId,
        name: &str,
        quantity: u64,
    ) -> Result<PendingTx, LedgerError>;

    /// The owning transporter appends a reading.
    async fn add_sensor_data(
        &self,
        signer: Identity,
        id: BatchId,
        temperature: i64,
        humidity: i64,
        location: &str,
    ) -> Result<PendingTx, LedgerError>;

    /// The owner hands custody to the next role in the chain.
    async fn transfer_ownership(
        &self,
        signer: Identity,
        id: BatchId,
        next_owner: Identity,
    ) -> Result<PendingTx, LedgerError>;

    /// The owning retailer closes the batch with an inspection outcome.
    async fn mark_as_arrived(
        &self,
        signer: Identity,
        id: BatchId,
        passed_inspection: bool,
    ) -> Result<PendingTx, LedgerError>;

    // ===== Reads =====

    /// The positional batch tuple; see [`crate::wire`].
    async fn get_batch_history(&self, id: BatchId) -> Result<Vec<LedgerValue>, LedgerError>;

    /// Role held by `identity`, `None` if unregistered.
    async fn role_of(&self, identity: Identity) -> Result<Option<Role>, LedgerError>;
}
