//! # Domain Invariants
//!
//! Rules for granting roles.

use shared_types::{Identity, LedgerError, Role};

/// Invariant: only the Admin identity registers participants.
pub fn invariant_admin_only(caller: Identity, admin: Identity) -> Result<(), LedgerError> {
    if caller != admin {
        return Err(LedgerError::not_authorized(caller, "register participants"));
    }
    Ok(())
}

/// Invariant: an identity holds at most one role, and Admin is never granted.
///
/// `existing` is the role `identity` already holds, if any.
pub fn invariant_single_role(
    identity: Identity,
    requested: Role,
    existing: Option<Role>,
) -> Result<(), LedgerError> {
    if requested == Role::Admin {
        return Err(LedgerError::InvalidInput(
            "the Admin role cannot be granted".to_string(),
        ));
    }
    if identity.is_zero() {
        return Err(LedgerError::InvalidInput(
            "cannot register the zero address".to_string(),
        ));
    }
    if let Some(role) = existing {
        return Err(LedgerError::AlreadyRegistered { identity, role });
    }
    Ok(())
}
