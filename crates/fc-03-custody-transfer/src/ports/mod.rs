//! # Ports Module
//!
//! The inbound custody transfer API. The outbound dependency is the shared
//! [`shared_types::SupplyChainLedger`].

pub mod inbound;

pub use inbound::*;
