//! # Registration Service
//!
//! Client-side registration flow: validate locally, submit the matching
//! `register*` call, then await confirmation.

use crate::domain::invariant_single_role;
use crate::ports::RoleRegistryApi;
use async_trait::async_trait;
use shared_types::{
    Confirmation, ConfirmationPolicy, Identity, LedgerError, PendingTx, Role, SupplyChainLedger,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Registration on behalf of one signer.
pub struct RegistrationService<L: SupplyChainLedger> {
    ledger: Arc<L>,
    signer: Identity,
    policy: ConfirmationPolicy,
}

impl<L: SupplyChainLedger> RegistrationService<L> {
    /// Create a service that signs as `signer`.
    pub fn new(ledger: Arc<L>, signer: Identity, policy: ConfirmationPolicy) -> Self {
        Self {
            ledger,
            signer,
            policy,
        }
    }

    /// The signing identity.
    pub fn signer(&self) -> Identity {
        self.signer
    }

    async fn submit(&self, role: Role, identity: Identity) -> Result<PendingTx, LedgerError> {
        match role {
            Role::Producer => self.ledger.register_producer(self.signer, identity).await,
            Role::Transporter => self.ledger.register_transporter(self.signer, identity).await,
            Role::Distributor => self.ledger.register_distributor(self.signer, identity).await,
            Role::Retailer => self.ledger.register_retailer(self.signer, identity).await,
            Role::Admin => Err(LedgerError::InvalidInput(
                "the Admin role cannot be granted".to_string(),
            )),
        }
    }
}

#[async_trait]
impl<L: SupplyChainLedger> RoleRegistryApi for RegistrationService<L> {
    async fn register(
        &self,
        role: Role,
        identity: Identity,
    ) -> Result<Confirmation, LedgerError> {
        // Existing role is left for the ledger to judge.
        if let Err(err) = invariant_single_role(identity, role, None) {
            warn!(signer = %self.signer, %identity, %role, error = %err, "Registration rejected locally");
            return Err(err);
        }

        let pending = self.submit(role, identity).await.inspect_err(|err| {
            warn!(signer = %self.signer, %identity, %role, error = %err, "Registration rejected");
        })?;

        let confirmation = pending.wait_for(&self.policy).await?;
        if confirmation.is_committed() {
            info!(%identity, %role, "Participant registered");
        }
        Ok(confirmation)
    }

    async fn role_of(&self, identity: Identity) -> Result<Option<Role>, LedgerError> {
        self.ledger.role_of(identity).await
    }
}
