//! # Integration Tests
//!
//! Scenarios that drive several subsystems against one in-memory ledger.

pub mod fixtures;

mod authorization;
mod cancellation;
mod concurrency;
mod decoder;
mod lifecycle;
mod properties;
