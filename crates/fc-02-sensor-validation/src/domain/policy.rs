//! # Cold-Chain Policy
//!
//! Ledger-side bounds. Readings outside them are still recorded but flag the
//! batch as violated.

use super::reading::{HUMIDITY_MAX, HUMIDITY_MIN, TEMPERATURE_MAX, TEMPERATURE_MIN};
use serde::{Deserialize, Serialize};
use shared_types::LedgerError;

/// Bounds the ledger applies when flagging excursions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColdChainPolicy {
    /// Lowest tolerated temperature, °C.
    pub min_temperature: i64,
    /// Highest tolerated temperature, °C.
    pub max_temperature: i64,
    /// Lowest tolerated humidity, %.
    pub min_humidity: i64,
    /// Highest tolerated humidity, %.
    pub max_humidity: i64,
}

impl Default for ColdChainPolicy {
    fn default() -> Self {
        Self {
            min_temperature: TEMPERATURE_MIN,
            max_temperature: TEMPERATURE_MAX,
            min_humidity: HUMIDITY_MIN,
            max_humidity: HUMIDITY_MAX,
        }
    }
}

impl ColdChainPolicy {
    /// Default policy with a different upper temperature bound.
    pub fn with_max_temperature(max_temperature: i64) -> Result<Self, LedgerError> {
        let policy = Self {
            max_temperature,
            ..Self::default()
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Reject inverted bounds.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.min_temperature > self.max_temperature {
            return Err(LedgerError::InvalidInput(format!(
                "cold-chain temperature bounds inverted: {} > {}",
                self.min_temperature, self.max_temperature
            )));
        }
        if self.min_humidity > self.max_humidity {
            return Err(LedgerError::InvalidInput(format!(
                "cold-chain humidity bounds inverted: {} > {}",
                self.min_humidity, self.max_humidity
            )));
        }
        Ok(())
    }

    /// Whether a reading leaves the policy bounds.
    pub fn is_excursion(&self, temperature: i64, humidity: i64) -> bool {
        !(self.min_temperature..=self.max_temperature).contains(&temperature)
            || !(self.min_humidity..=self.max_humidity).contains(&humidity)
    }
}
