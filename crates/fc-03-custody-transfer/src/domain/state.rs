//! # Custody States
//!
//! Where a batch sits in the chain, derived from the role of its current
//! owner and the finalized flag.

use serde::{Deserialize, Serialize};
use shared_types::Role;
use std::fmt;

/// Position of a batch in the custody chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CustodyState {
    /// Created, still with the producer.
    WithProducer,
    /// In transit.
    WithTransporter,
    /// At the distributor.
    WithDistributor,
    /// At the retailer, awaiting inspection.
    WithRetailer,
    /// Inspected; terminal.
    Finalized,
}

impl CustodyState {
    /// Derive the state from the current owner's role.
    ///
    /// `None` when the owner holds no custody role.
    pub fn from_holder(owner_role: Option<Role>, is_finalized: bool) -> Option<Self> {
        if is_finalized {
            return Some(CustodyState::Finalized);
        }
        match owner_role? {
            Role::Producer => Some(CustodyState::WithProducer),
            Role::Transporter => Some(CustodyState::WithTransporter),
            Role::Distributor => Some(CustodyState::WithDistributor),
            Role::Retailer => Some(CustodyState::WithRetailer),
            Role::Admin => None,
        }
    }
}

impl fmt::Display for CustodyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CustodyState::WithProducer => "With Producer",
            CustodyState::WithTransporter => "With Transporter",
            CustodyState::WithDistributor => "With Distributor",
            CustodyState::WithRetailer => "With Retailer",
            CustodyState::Finalized => "Finalized",
        };
        f.write_str(label)
    }
}
