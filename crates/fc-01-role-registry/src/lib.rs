//! # FC-01 Role Registry
//!
//! Admin-granted participant roles.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! The ledger deployer (Admin) grants exactly one role to each participant
//! identity. Roles gate every other ledger call:
//!
//! | Role | Capabilities |
//! |------|--------------|
//! | Admin | register participants |
//! | Producer | create batch, transfer custody |
//! | Transporter | record sensor data, transfer custody |
//! | Distributor | transfer custody |
//! | Retailer | finalize batch |
//!
//! There is no unregister operation; once granted, a role is permanent.
//!
//! ## Module Structure
//!
//! ```text
//! fc-01-role-registry/
//! ├── domain/     # RoleRegistry, registration invariants
//! ├── ports/      # RoleRegistryApi
//! └── service.rs  # RegistrationService (client-side flow)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{invariant_admin_only, invariant_single_role, RoleRegistry};
pub use ports::RoleRegistryApi;
pub use service::RegistrationService;
