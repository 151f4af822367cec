//! # Domain Invariants
//!
//! Rules every custody transfer satisfies. The ledger applies them in the
//! order finalized, ownership, forward role.

use shared_types::{BatchId, Identity, LedgerError, Role};

/// Invariant: a finalized batch never changes again.
pub fn invariant_not_finalized(batch: BatchId, is_finalized: bool) -> Result<(), LedgerError> {
    if is_finalized {
        return Err(LedgerError::invalid_state(batch, "batch is finalized"));
    }
    Ok(())
}

/// Invariant: only the current owner acts on a batch.
pub fn invariant_current_owner(
    caller: Identity,
    owner: Identity,
    action: &str,
) -> Result<(), LedgerError> {
    if caller != owner {
        return Err(LedgerError::not_authorized(caller, action));
    }
    Ok(())
}

/// Invariant: custody moves exactly one step forward.
///
/// Returns the role the recipient must hold.
pub fn invariant_forward_transfer(
    batch: BatchId,
    from: Role,
    recipient: Identity,
    recipient_role: Option<Role>,
) -> Result<Role, LedgerError> {
    let expected = from.next_custodian().ok_or_else(|| {
        LedgerError::invalid_state(batch, format!("a {from} cannot transfer custody"))
    })?;

    if recipient_role != Some(expected) {
        return Err(LedgerError::InvalidRoleTransition {
            batch,
            from,
            expected,
            recipient,
            actual: recipient_role,
        });
    }
    Ok(expected)
}

/// Invariant: the recipient is a real, different identity.
///
/// Checked locally before a transfer is submitted.
pub fn invariant_distinct_recipient(
    caller: Identity,
    recipient: Identity,
) -> Result<(), LedgerError> {
    if recipient.is_zero() {
        return Err(LedgerError::InvalidInput(
            "recipient must not be the zero address".to_string(),
        ));
    }
    if recipient == caller {
        return Err(LedgerError::InvalidInput(
            "cannot transfer custody to yourself".to_string(),
        ));
    }
    Ok(())
}

/// Whether the roles along an ownership history form a valid chain prefix.
///
/// The chain starts with Producer and every step is the predecessor's
/// `next_custodian`.
pub fn validate_custody_chain(roles: &[Role]) -> bool {
    match roles.first() {
        None => true,
        Some(Role::Producer) => roles
            .windows(2)
            .all(|pair| pair[0].next_custodian() == Some(pair[1])),
        Some(_) => false,
    }
}
