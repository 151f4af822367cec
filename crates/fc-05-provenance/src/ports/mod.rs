//! # Ports Module
//!
//! The inbound provenance query API.

pub mod inbound;

pub use inbound::*;
