//! In-Memory Ledger Adapter
//!
//! Implements `SupplyChainLedger` over process memory. One mutex guards the
//! role registry, the batch store and the transaction counter, so every
//! check-and-set runs atomically and mutations commit in a single order.
//! A committed mutation is visible to readers before its confirmation is
//! delivered.

use crate::adapters::clock::{Clock, SystemClock};
use crate::domain::Batch;
use async_trait::async_trait;
use fc_01_role_registry::RoleRegistry;
use fc_02_sensor_validation::ColdChainPolicy;
use fc_03_custody_transfer::{
    invariant_current_owner, invariant_forward_transfer, invariant_not_finalized,
};
use parking_lot::Mutex;
use shared_types::{
    encode_batch_history, BatchId, Capability, Identity, LedgerCall, LedgerError, LedgerValue,
    PendingTx, Role, SensorLog, SupplyChainLedger, Timestamp, TxId, TxReceipt,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Ledger settings.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Deployer identity; holds the Admin role.
    pub admin: Identity,
    /// Delay between commit and confirmation delivery.
    pub confirmation_delay: Duration,
    /// Bounds used to flag excursions.
    pub cold_chain: ColdChainPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            admin: Identity::from_low_u64(1),
            confirmation_delay: Duration::ZERO,
            cold_chain: ColdChainPolicy::default(),
        }
    }
}

struct LedgerState {
    registry: RoleRegistry,
    batches: BTreeMap<BatchId, Batch>,
    next_tx: u64,
}

/// The reference ledger.
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
    reachable: AtomicBool,
}

impl InMemoryLedger {
    /// Create a ledger using wall-clock time.
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a ledger stamping records with `clock`.
    pub fn with_clock(config: LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                registry: RoleRegistry::new(config.admin),
                batches: BTreeMap::new(),
                next_tx: 1,
            }),
            config,
            clock,
            reachable: AtomicBool::new(true),
        }
    }

    /// The Admin identity.
    pub fn admin(&self) -> Identity {
        self.config.admin
    }

    /// Simulate losing or regaining the connection.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Number of stored batches.
    pub fn batch_count(&self) -> usize {
        self.state.lock().batches.len()
    }

    fn ensure_reachable(&self) -> Result<(), LedgerError> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(LedgerError::Connectivity("ledger endpoint unreachable".to_string()))
        }
    }

    /// Run `apply` under the state lock; on success assign a transaction
    /// number and hand back the confirmation handle. The clock is read once
    /// while the lock is held, so records and receipts share one timestamp
    /// and timestamps follow commit order.
    fn execute<F>(&self, signer: Identity, call: LedgerCall, apply: F) -> Result<PendingTx, LedgerError>
    where
        F: FnOnce(&mut LedgerState, Timestamp) -> Result<(), LedgerError>,
    {
        self.ensure_reachable()?;

        let mut state = self.state.lock();
        let now = self.clock.now();
        if let Err(err) = apply(&mut state, now) {
            warn!(call = call.name(), signer = %signer, error = %err, "Ledger rejected call");
            return Err(err);
        }

        let tx_id = TxId(state.next_tx);
        state.next_tx += 1;
        drop(state);

        let receipt = TxReceipt::new(tx_id, signer, call, now);
        info!(
            tx_id = %receipt.tx_id,
            tx_hash = %receipt.tx_hash,
            call = receipt.call.name(),
            signer = %signer,
            "Transaction committed"
        );
        Ok(PendingTx::committed(receipt, self.config.confirmation_delay))
    }

    fn register(&self, signer: Identity, role: Role, identity: Identity) -> Result<PendingTx, LedgerError> {
        self.execute(signer, LedgerCall::Register { role, identity }, |state, _| {
            state.registry.register(signer, role, identity)
        })
    }
}

fn batch_mut(state: &mut LedgerState, id: BatchId) -> Result<&mut Batch, LedgerError> {
    state.batches.get_mut(&id).ok_or(LedgerError::NotFound(id))
}

#[async_trait]
impl SupplyChainLedger for InMemoryLedger {
    async fn register_producer(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError> {
        self.register(signer, Role::Producer, identity)
    }

    async fn register_transporter(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError> {
        self.register(signer, Role::Transporter, identity)
    }

    async fn register_distributor(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError> {
        self.register(signer, Role::Distributor, identity)
    }

    async fn register_retailer(
        &self,
        signer: Identity,
        identity: Identity,
    ) -> Result<PendingTx, LedgerError> {
        self.register(signer, Role::Retailer, identity)
    }

    async fn create_batch(
        &self,
        signer: Identity,
        id: BatchId,
        name: &str,
        quantity: u64,
    ) -> Result<PendingTx, LedgerError> {
        self.execute(signer, LedgerCall::CreateBatch { id }, |state, now| {
            state
                .registry
                .require_capability(signer, Capability::CreateBatch, "create a batch")?;
            if state.batches.contains_key(&id) {
                return Err(LedgerError::DuplicateId(id));
            }
            let batch = Batch::create(id, name, quantity, signer, now)?;
            state.batches.insert(id, batch);
            Ok(())
        })
    }

    async fn add_sensor_data(
        &self,
        signer: Identity,
        id: BatchId,
        temperature: i64,
        humidity: i64,
        location: &str,
    ) -> Result<PendingTx, LedgerError> {
        let excursion = self.config.cold_chain.is_excursion(temperature, humidity);
        self.execute(signer, LedgerCall::AddSensorData { id }, |state, now| {
            let role_check = state
                .registry
                .require_role(signer, Role::Transporter, "record sensor data");
            let batch = batch_mut(state, id)?;
            invariant_not_finalized(id, batch.is_finalized())?;
            invariant_current_owner(signer, batch.current_owner(), "record sensor data")?;
            role_check?;
            if excursion {
                warn!(batch = %id, temperature, humidity, "Cold-chain excursion recorded");
            }
            batch.append_sensor_log(
                SensorLog {
                    timestamp: now,
                    temperature,
                    humidity,
                    location: location.to_string(),
                    recorded_by: signer,
                },
                excursion,
            )
        })
    }

    async fn transfer_ownership(
        &self,
        signer: Identity,
        id: BatchId,
        next_owner: Identity,
    ) -> Result<PendingTx, LedgerError> {
        self.execute(signer, LedgerCall::TransferOwnership { id, next_owner }, |state, now| {
            let from = state.registry.role_of(signer);
            let recipient_role = state.registry.role_of(next_owner);
            let batch = batch_mut(state, id)?;
            invariant_not_finalized(id, batch.is_finalized())?;
            invariant_current_owner(signer, batch.current_owner(), "transfer custody")?;
            let from = from.ok_or_else(|| LedgerError::not_authorized(signer, "transfer custody"))?;
            invariant_forward_transfer(id, from, next_owner, recipient_role)?;
            batch.transfer_to(next_owner, now)
        })
    }

    async fn mark_as_arrived(
        &self,
        signer: Identity,
        id: BatchId,
        passed_inspection: bool,
    ) -> Result<PendingTx, LedgerError> {
        let call = LedgerCall::MarkAsArrived {
            id,
            passed: passed_inspection,
        };
        self.execute(signer, call, |state, _| {
            let role_check = state
                .registry
                .require_role(signer, Role::Retailer, "finalize the batch");
            let batch = batch_mut(state, id)?;
            invariant_not_finalized(id, batch.is_finalized())?;
            invariant_current_owner(signer, batch.current_owner(), "finalize the batch")?;
            role_check?;
            batch.finalize(passed_inspection)
        })
    }

    async fn get_batch_history(&self, id: BatchId) -> Result<Vec<LedgerValue>, LedgerError> {
        self.ensure_reachable()?;
        debug!(batch = %id, "Reading batch history");
        let state = self.state.lock();
        state
            .batches
            .get(&id)
            .map(|batch| encode_batch_history(&batch.to_record()))
            .ok_or(LedgerError::NotFound(id))
    }

    async fn role_of(&self, identity: Identity) -> Result<Option<Role>, LedgerError> {
        self.ensure_reachable()?;
        Ok(self.state.lock().registry.role_of(identity))
    }
}
