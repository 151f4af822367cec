//! # User-Facing Status
//!
//! Maps ledger outcomes onto the short status line shown to participants.
//! Every failure surfaces here; nothing is swallowed.

use crate::errors::LedgerError;
use std::fmt;

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Pending,
    Success,
    Failure,
}

/// A status line plus the underlying diagnostic, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStatus {
    pub level: StatusLevel,
    pub message: String,
    pub diagnostic: Option<String>,
}

impl UserStatus {
    pub fn pending(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Pending,
            message: message.into(),
            diagnostic: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            message: message.into(),
            diagnostic: None,
        }
    }

    pub fn failure(message: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Failure,
            message: message.into(),
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Status for a rejected state-changing submission.
    pub fn from_error(error: &LedgerError) -> Self {
        let message = match error {
            LedgerError::NotAuthorized { .. } => {
                "Only an authorized participant can perform this action.".to_string()
            }
            LedgerError::AlreadyRegistered { .. } => "Participant is already registered.".to_string(),
            LedgerError::DuplicateId(id) => format!("Batch {id} already exists."),
            LedgerError::NotFound(_) => "Data not found.".to_string(),
            LedgerError::InvalidState { .. } => {
                "This batch can no longer be changed.".to_string()
            }
            LedgerError::InvalidRoleTransition { expected, .. } => {
                format!("The recipient must be a registered {expected}.")
            }
            LedgerError::OutOfRange { field, min, max, .. } => {
                format!("{field} must be between {min} and {max}!")
            }
            LedgerError::InvalidInput(detail) => format!("Invalid input: {detail}"),
            LedgerError::Connectivity(_) => "A ledger connection is required!".to_string(),
            LedgerError::MalformedRecord(_) => "Data not found.".to_string(),
        };
        Self::failure(message, error.to_string())
    }

    /// Status for a failed provenance query.
    ///
    /// A missing batch and an unreachable ledger read the same to a
    /// consumer; the diagnostic keeps them apart.
    pub fn from_query_error(error: &LedgerError) -> Self {
        match error {
            LedgerError::NotFound(_)
            | LedgerError::Connectivity(_)
            | LedgerError::MalformedRecord(_) => Self::failure("Data not found.", error.to_string()),
            other => Self::from_error(other),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.level == StatusLevel::Failure
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.level {
            StatusLevel::Pending => "Pending",
            StatusLevel::Success => "Success",
            StatusLevel::Failure => "Error",
        };
        write!(f, "{prefix}: {}", self.message)
    }
}
