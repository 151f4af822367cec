//! # Ports Module
//!
//! The inbound sensor logging API. The outbound dependency is the shared
//! [`shared_types::SupplyChainLedger`].

pub mod inbound;

pub use inbound::*;
