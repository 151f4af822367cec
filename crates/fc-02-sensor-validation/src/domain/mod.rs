//! # Domain Module
//!
//! Sensor readings, the client-side admissible ranges, and the ledger-side
//! cold-chain policy.

pub mod policy;
pub mod reading;

pub use policy::ColdChainPolicy;
pub use reading::*;
