//! # Error Types
//!
//! The single error taxonomy of the batch lifecycle protocol. Local
//! pre-checks and ledger enforcement both report through `LedgerError`, so a
//! caller handles a rejected submission the same way wherever it was caught.

use crate::entities::{BatchId, Identity, Role, SensorField};
use thiserror::Error;

/// Errors raised by participants' local checks or by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Wrong role, or not the current owner.
    #[error("Not authorized: {caller} cannot {action}")]
    NotAuthorized {
        /// The rejected signer.
        caller: Identity,
        /// What the signer attempted.
        action: String,
    },

    /// The identity already holds a role.
    #[error("Already registered: {identity} holds role {role}")]
    AlreadyRegistered {
        /// The identity Admin tried to register.
        identity: Identity,
        /// The role it already holds.
        role: Role,
    },

    /// A batch with this id already exists.
    #[error("Duplicate batch id: {0}")]
    DuplicateId(BatchId),

    /// No batch with this id exists.
    #[error("Batch not found: {0}")]
    NotFound(BatchId),

    /// The action is not allowed in the batch's current state.
    #[error("Invalid state for batch {batch}: {reason}")]
    InvalidState {
        /// The batch acted upon.
        batch: BatchId,
        /// Why the state rejects the action.
        reason: String,
    },

    /// The recipient of a transfer does not hold the successor role.
    #[error(
        "Invalid role transition for batch {batch}: {from} must hand over to a {expected}, \
         recipient {recipient} holds {actual:?}"
    )]
    InvalidRoleTransition {
        /// The batch being transferred.
        batch: BatchId,
        /// Role of the current owner.
        from: Role,
        /// Role the recipient must hold.
        expected: Role,
        /// The proposed recipient.
        recipient: Identity,
        /// Role the recipient actually holds.
        actual: Option<Role>,
    },

    /// A sensor value outside the admissible range.
    #[error("{field} out of range: {value} not within [{min}, {max}]")]
    OutOfRange {
        /// Which channel.
        field: SensorField,
        /// The rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// A malformed argument caught before submission.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The ledger cannot be reached.
    #[error("Ledger unreachable: {0}")]
    Connectivity(String),

    /// The ledger returned a tuple that does not match the positional contract.
    #[error("Malformed ledger record: {0}")]
    MalformedRecord(String),
}

/// Payload-free discriminant of [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotAuthorized,
    AlreadyRegistered,
    DuplicateId,
    NotFound,
    InvalidState,
    InvalidRoleTransition,
    OutOfRange,
    InvalidInput,
    Connectivity,
    MalformedRecord,
}

impl LedgerError {
    /// The discriminant, for matching without payloads.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::NotAuthorized { .. } => ErrorKind::NotAuthorized,
            LedgerError::AlreadyRegistered { .. } => ErrorKind::AlreadyRegistered,
            LedgerError::DuplicateId(_) => ErrorKind::DuplicateId,
            LedgerError::NotFound(_) => ErrorKind::NotFound,
            LedgerError::InvalidState { .. } => ErrorKind::InvalidState,
            LedgerError::InvalidRoleTransition { .. } => ErrorKind::InvalidRoleTransition,
            LedgerError::OutOfRange { .. } => ErrorKind::OutOfRange,
            LedgerError::InvalidInput(_) => ErrorKind::InvalidInput,
            LedgerError::Connectivity(_) => ErrorKind::Connectivity,
            LedgerError::MalformedRecord(_) => ErrorKind::MalformedRecord,
        }
    }

    /// Whether the error was raised before anything reached the ledger.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            LedgerError::OutOfRange { .. } | LedgerError::InvalidInput(_)
        )
    }

    /// Shorthand for a `NotAuthorized` error.
    pub fn not_authorized(caller: Identity, action: impl Into<String>) -> Self {
        LedgerError::NotAuthorized {
            caller,
            action: action.into(),
        }
    }

    /// Shorthand for an `InvalidState` error.
    pub fn invalid_state(batch: BatchId, reason: impl Into<String>) -> Self {
        LedgerError::InvalidState {
            batch,
            reason: reason.into(),
        }
    }
}
