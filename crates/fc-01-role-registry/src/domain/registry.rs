//! # Role Registry
//!
//! The ledger-side role table. The Admin identity is fixed at construction
//! and holds the Admin role implicitly.

use super::invariants::{invariant_admin_only, invariant_single_role};
use shared_types::{Capability, Identity, LedgerError, Role};
use std::collections::HashMap;

/// Maps identities to the single role each holds.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    admin: Identity,
    assignments: HashMap<Identity, Role>,
}

impl RoleRegistry {
    /// Create a registry owned by `admin`.
    pub fn new(admin: Identity) -> Self {
        Self {
            admin,
            assignments: HashMap::new(),
        }
    }

    /// The Admin identity.
    pub fn admin(&self) -> Identity {
        self.admin
    }

    /// Role held by `identity`.
    pub fn role_of(&self, identity: Identity) -> Option<Role> {
        if identity == self.admin {
            return Some(Role::Admin);
        }
        self.assignments.get(&identity).copied()
    }

    /// Whether `identity` holds `role`.
    pub fn has_role(&self, identity: Identity, role: Role) -> bool {
        self.role_of(identity) == Some(role)
    }

    /// Grant `role` to `identity` on behalf of `caller`.
    pub fn register(
        &mut self,
        caller: Identity,
        role: Role,
        identity: Identity,
    ) -> Result<(), LedgerError> {
        invariant_admin_only(caller, self.admin)?;
        invariant_single_role(identity, role, self.role_of(identity))?;
        self.assignments.insert(identity, role);
        Ok(())
    }

    /// Require that `caller` holds `role`; `action` names the attempt.
    pub fn require_role(
        &self,
        caller: Identity,
        role: Role,
        action: &str,
    ) -> Result<(), LedgerError> {
        if self.has_role(caller, role) {
            Ok(())
        } else {
            Err(LedgerError::not_authorized(caller, action))
        }
    }

    /// Require that `caller`'s role authorizes `capability`.
    pub fn require_capability(
        &self,
        caller: Identity,
        capability: Capability,
        action: &str,
    ) -> Result<Role, LedgerError> {
        match self.role_of(caller) {
            Some(role) if role.allows(capability) => Ok(role),
            _ => Err(LedgerError::not_authorized(caller, action)),
        }
    }

    /// Number of registered participants, excluding Admin.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether no participant has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
