//! # Domain Module
//!
//! The role table and the rules for granting roles.

pub mod invariants;
pub mod registry;

pub use invariants::*;
pub use registry::RoleRegistry;
