//! # Domain Module
//!
//! Custody states and the rules every transfer must satisfy.

pub mod invariants;
pub mod state;

pub use invariants::*;
pub use state::CustodyState;
