//! # Ports Module
//!
//! The inbound batch lifecycle API. The outbound dependency is the shared
//! [`shared_types::SupplyChainLedger`], implemented here by
//! [`crate::adapters::InMemoryLedger`].

pub mod inbound;

pub use inbound::*;
