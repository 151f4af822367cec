//! # Domain Module
//!
//! The consumer-facing report.

pub mod report;

pub use report::*;
