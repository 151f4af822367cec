//! # Shared Types Crate
//!
//! This crate contains the vocabulary every FreshChain subsystem speaks:
//! participant identities, the closed role variant, the ledger's positional
//! batch tuple, the `SupplyChainLedger` contract, and the `PendingTx`
//! confirmation handle.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types are defined here.
//! - **Ledger Authority**: the ledger is the final arbiter of authorization
//!   and committed state; local checks only fail fast.
//! - **One Decode Step**: the untagged 9-field tuple is turned into named
//!   fields by exactly one function in [`wire`].

pub mod entities;
pub mod errors;
pub mod ledger;
pub mod pending;
pub mod status;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod wire;

pub use entities::*;
pub use errors::*;
pub use ledger::SupplyChainLedger;
pub use pending::*;
pub use status::{StatusLevel, UserStatus};
pub use wire::{decode_batch_history, encode_batch_history, LedgerValue};
