//! # FC-05 Provenance Decoder
//!
//! Turns the ledger's positional batch tuple into a report a consumer can
//! read.
//!
//! **Subsystem ID:** 5
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Derived Fields
//!
//! | Field | Source | Values |
//! |-------|--------|--------|
//! | shipment status | `isFinalized` | In Transit / Finalized |
//! | violation summary | `isViolated` | OK / Quality alert |
//! | inspection summary | `isFinalized`, `passedInspection` | Awaiting / Approved / Rejected |
//! | latest reading | last sensor log | reading or "no data" |
//!
//! Queries need no role.
//!
//! ## Module Structure
//!
//! ```text
//! fc-05-provenance/
//! ├── domain/     # ProvenanceReport and its summaries
//! ├── ports/      # ProvenanceApi
//! └── service.rs  # ProvenanceService, traceability links
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    decode_report, CustodyStep, DisplayTimestamp, InspectionSummary, LatestReading,
    ProvenanceReport, ShipmentStatus, ViolationSummary,
};
pub use ports::ProvenanceApi;
pub use service::{traceability_link, ProvenanceService};
