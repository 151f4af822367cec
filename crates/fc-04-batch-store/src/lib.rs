//! # FC-04 Batch Store
//!
//! Batch lifecycle and the in-memory reference ledger.
//!
//! **Subsystem ID:** 4
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Producers create batches and retailers finalize them (`BatchService`).
//! - `InMemoryLedger` is the authoritative store: it serializes every
//!   mutation behind one lock and re-checks roles, ownership, custody order
//!   and the cold-chain policy on each call.
//!
//! ## Module Structure
//!
//! ```text
//! fc-04-batch-store/
//! ├── domain/     # Batch entity
//! ├── adapters/   # InMemoryLedger, clocks
//! ├── ports/      # BatchLifecycleApi
//! └── service.rs  # BatchService (client-side flow)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{Clock, InMemoryLedger, LedgerConfig, ManualClock, SystemClock};
pub use domain::{validate_batch_fields, Batch};
pub use ports::BatchLifecycleApi;
pub use service::{created_message, finalized_message, BatchService};
