//! # Inbound Ports
//!
//! What a participant can do with the role registry.

use async_trait::async_trait;
use shared_types::{Confirmation, Identity, LedgerError, Role};

/// Role registry API - inbound port.
#[async_trait]
pub trait RoleRegistryApi: Send + Sync {
    /// Grant `role` to `identity`; only succeeds when signed by Admin.
    async fn register(&self, role: Role, identity: Identity)
        -> Result<Confirmation, LedgerError>;

    /// Look up the role `identity` holds.
    async fn role_of(&self, identity: Identity) -> Result<Option<Role>, LedgerError>;
}
