//! # Scripted Ledger
//!
//! A `SupplyChainLedger` double for client-side tests. It records every
//! submission and commits it without applying any state; reads return
//! whatever records and roles the test installed.

use crate::entities::{BatchId, BatchRecord, Identity, Role, Timestamp};
use crate::errors::LedgerError;
use crate::ledger::SupplyChainLedger;
use crate::pending::{LedgerCall, PendingTx, TxId, TxReceipt};
use crate::wire::{encode_batch_history, LedgerValue};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// Ledger double with scripted reads and recorded writes.
#[derive(Default)]
pub struct ScriptedLedger {
    submissions: Mutex<Vec<LedgerCall>>,
    records: Mutex<HashMap<BatchId, BatchRecord>>,
    roles: Mutex<HashMap<Identity, Role>>,
    next_error: Mutex<Option<LedgerError>>,
    confirmation_delay: Mutex<Duration>,
}

impl ScriptedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the record returned by `get_batch_history(id)`.
    pub fn set_record(&self, id: BatchId, record: BatchRecord) {
        self.records.lock().insert(id, record);
    }

    pub fn set_role(&self, identity: Identity, role: Role) {
        self.roles.lock().insert(identity, role);
    }

    /// Reject the next submission with `error`.
    pub fn fail_next(&self, error: LedgerError) {
        *self.next_error.lock() = Some(error);
    }

    /// Delay before submitted transactions confirm.
    pub fn set_confirmation_delay(&self, delay: Duration) {
        *self.confirmation_delay.lock() = delay;
    }

    /// Every submission accepted so far, in order.
    pub fn submissions(&self) -> Vec<LedgerCall> {
        self.submissions.lock().clone()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().len()
    }

    fn submit(&self, signer: Identity, call: LedgerCall) -> Result<PendingTx, LedgerError> {
        if let Some(error) = self.next_error.lock().take() {
            return Err(error);
        }
        let mut submissions = self.submissions.lock();
        submissions.push(call.clone());
        let receipt = TxReceipt::new(
            TxId(submissions.len() as u64),
            signer,
            call,
            Timestamp(1_700_000_000 + submissions.len() as u64),
        );
        Ok(PendingTx::committed(receipt, *self.confirmation_delay.lock()))
    }
}

#[async_trait]
impl SupplyChainLedger for ScriptedLedger {
    async fn register_producer(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError> {
        self.submit(signer, LedgerCall::Register { role: Role::Producer, identity })
    }

    async fn register_transporter(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError> {
        self.submit(signer, LedgerCall::Register { role: Role::Transporter, identity })
    }

    async fn register_distributor(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError> {
        self.submit(signer, LedgerCall::Register { role: Role::Distributor, identity })
    }

    async fn register_retailer(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError> {
        self.submit(signer, LedgerCall::Register { role: Role::Retailer, identity })
    }

    async fn create_batch(
        &self,
        signer: Identity,
        id: BatchId,
        _name: &str,
        _quantity: u64,
    ) -> Result<PendingTx, LedgerError> {
        self.submit(signer, LedgerCall::CreateBatch { id })
    }

    async fn add_sensor_data(
        &self,
        signer: Identity,
        id: BatchId,
        _temperature: i64,
        _humidity: i64,
        _location: &str,
    ) -> Result<PendingTx, LedgerError> {
        self.submit(signer, LedgerCall::AddSensorData { id })
    }

    async fn transfer_ownership(
        &self,
        signer: Identity,
        id: BatchId,
        next_owner: Identity,
    ) -> Result<PendingTx, LedgerError> {
        self.submit(signer, LedgerCall::TransferOwnership { id, next_owner })
    }

    async fn mark_as_arrived(
        &self,
        signer: Identity,
        id: BatchId,
        passed_inspection: bool,
    ) -> Result<PendingTx, LedgerError> {
        self.submit(
            signer,
            LedgerCall::MarkAsArrived {
                id,
                passed: passed_inspection,
            },
        )
    }

    async fn get_batch_history(&self, id: BatchId) -> Result<Vec<LedgerValue>, LedgerError> {
        self.records
            .lock()
            .get(&id)
            .map(encode_batch_history)
            .ok_or(LedgerError::NotFound(id))
    }

    async fn role_of(&self, identity: Identity) -> Result<Option<Role>, LedgerError> {
        Ok(self.roles.lock().get(&identity).copied())
    }
}
