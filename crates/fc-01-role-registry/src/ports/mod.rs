//! # Ports Module
//!
//! The inbound registration API. The outbound dependency is the shared
//! [`shared_types::SupplyChainLedger`].

pub mod inbound;

pub use inbound::*;
