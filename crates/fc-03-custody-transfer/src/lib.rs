//! # FC-03 Custody Transfer
//!
//! Forward-only hand-off of a batch along the supply chain.
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## State Machine
//!
//! ```text
//! WithProducer → WithTransporter → WithDistributor → WithRetailer → Finalized
//! ```
//!
//! No back-transfer, no skipping. A retailer ends the chain with
//! `markAsArrived` instead of a transfer.
//!
//! ## Module Structure
//!
//! ```text
//! fc-03-custody-transfer/
//! ├── domain/     # CustodyState, transfer invariants
//! ├── ports/      # CustodyTransferApi
//! └── service.rs  # CustodyService (client-side flow)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    invariant_current_owner, invariant_distinct_recipient, invariant_forward_transfer,
    invariant_not_finalized, validate_custody_chain, CustodyState,
};
pub use ports::CustodyTransferApi;
pub use service::{transferred_message, CustodyService};
