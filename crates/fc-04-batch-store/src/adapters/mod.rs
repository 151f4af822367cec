//! # Adapters Layer (Hexagonal Architecture)
//!
//! The in-memory ledger and the clocks it stamps records with.

mod clock;
mod memory_ledger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory_ledger::{InMemoryLedger, LedgerConfig};
