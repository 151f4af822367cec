//! # Participant Clients
//!
//! One client per identity, bundling the subsystem services behind the
//! actions a role can take. Every action ends in a [`UserStatus`]; raw
//! error detail stays in its diagnostic.

use fc_01_role_registry::{RegistrationService, RoleRegistryApi};
use fc_02_sensor_validation::{recorded_message, SensorLoggingApi, SensorReading, SensorService};
use fc_03_custody_transfer::{transferred_message, CustodyService, CustodyTransferApi};
use fc_04_batch_store::{created_message, finalized_message, BatchLifecycleApi, BatchService};
use fc_05_provenance::{traceability_link, ProvenanceApi, ProvenanceReport, ProvenanceService};
use shared_types::{
    BatchId, Confirmation, ConfirmationPolicy, Identity, LedgerError, Role, SupplyChainLedger,
    UserStatus,
};
use std::sync::Arc;

/// A signed-in participant.
pub struct ParticipantClient<L: SupplyChainLedger> {
    identity: Identity,
    registration: RegistrationService<L>,
    batches: BatchService<L>,
    sensors: SensorService<L>,
    custody: CustodyService<L>,
    provenance: ProvenanceService<L>,
}

fn settle(outcome: Result<Confirmation, LedgerError>, success: impl FnOnce() -> String) -> UserStatus {
    match outcome {
        Ok(Confirmation::Committed(_)) => UserStatus::success(success()),
        Ok(Confirmation::Unconfirmed { tx_id }) => {
            UserStatus::pending(format!("Transaction {tx_id} submitted, awaiting confirmation."))
        }
        Err(err) => UserStatus::from_error(&err),
    }
}

impl<L: SupplyChainLedger> ParticipantClient<L> {
    /// Create a client signing as `identity`.
    pub fn new(ledger: Arc<L>, identity: Identity, policy: ConfirmationPolicy) -> Self {
        Self {
            identity,
            registration: RegistrationService::new(ledger.clone(), identity, policy),
            batches: BatchService::new(ledger.clone(), identity, policy),
            sensors: SensorService::new(ledger.clone(), identity, policy),
            custody: CustodyService::new(ledger.clone(), identity, policy),
            provenance: ProvenanceService::new(ledger),
        }
    }

    /// The signing identity.
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Role this identity holds on the ledger.
    pub async fn role(&self) -> Result<Option<Role>, LedgerError> {
        self.registration.role_of(self.identity).await
    }

    /// Admin: grant `role` to `identity`.
    pub async fn register(&self, role: Role, identity: Identity) -> UserStatus {
        let outcome = self.registration.register(role, identity).await;
        if let Err(LedgerError::NotAuthorized { .. }) = outcome {
            return UserStatus::failure(
                "Only the Admin (Contract Owner) can register users!",
                format!("{} is not the Admin", self.identity),
            );
        }
        settle(outcome, || format!("{role} registered: {identity}"))
    }

    /// Producer: create a batch.
    pub async fn create_batch(&self, id: BatchId, name: &str, quantity: u64) -> UserStatus {
        settle(self.batches.create_batch(id, name, quantity).await, || {
            created_message(id)
        })
    }

    /// Transporter: append a reading.
    pub async fn add_sensor_data(&self, id: BatchId, reading: SensorReading) -> UserStatus {
        let message = recorded_message(&reading);
        settle(self.sensors.record(id, reading).await, || message)
    }

    /// Any custodian: hand the batch to `next_owner`, who holds `next_role`.
    pub async fn transfer(&self, id: BatchId, next_owner: Identity, next_role: Role) -> UserStatus {
        settle(self.custody.transfer(id, next_owner).await, || {
            transferred_message(next_role)
        })
    }

    /// Retailer: record the inspection and close the batch.
    pub async fn finalize(&self, id: BatchId, passed_inspection: bool) -> UserStatus {
        settle(self.batches.finalize(id, passed_inspection).await, || {
            finalized_message(passed_inspection).to_string()
        })
    }

    /// Anyone: the provenance report.
    pub async fn query(&self, id: BatchId) -> Result<ProvenanceReport, UserStatus> {
        self.provenance.query_status(id).await
    }

    /// Customer link for a batch.
    pub fn traceability_link(&self, base_url: &str, id: BatchId) -> String {
        traceability_link(base_url, id)
    }
}
