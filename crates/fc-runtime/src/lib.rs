//! # FreshChain Runtime
//!
//! Wires the FreshChain subsystems to a ledger.
//!
//! ## Modular Structure
//!
//! - `config` - Environment-driven settings and validation
//! - `telemetry` - `tracing-subscriber` setup
//! - `participants` - Per-identity clients with user-facing status lines
//! - `walkthrough` - End-to-end custody scenario on an in-memory ledger
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Validate it
//! 3. Initialize logging
//! 4. Run the walkthrough and print the customer card

pub mod config;
pub mod participants;
pub mod telemetry;
pub mod walkthrough;

pub use config::{ConfigError, RuntimeConfig};
pub use participants::ParticipantClient;
pub use walkthrough::{run, Step, WalkthroughOutcome};
