//! # Domain Module
//!
//! The batch entity as the ledger stores it.

pub mod batch;

pub use batch::{validate_batch_fields, Batch};
