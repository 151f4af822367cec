//! Runtime configuration from environment variables.

use fc_02_sensor_validation::ColdChainPolicy;
use fc_04_batch_store::LedgerConfig;
use shared_types::{ConfirmationPolicy, Identity};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue {
        /// Environment variable name.
        var: &'static str,
        /// The offending value.
        value: String,
    },

    /// The Admin identity is the zero address.
    #[error("Admin address must not be the zero address")]
    ZeroAdmin,

    /// Waiting less than the commit delay would leave every call unconfirmed.
    #[error("Confirmation timeout ({timeout_ms} ms) is shorter than the confirmation delay ({delay_ms} ms)")]
    TimeoutShorterThanDelay {
        /// Configured wait bound.
        timeout_ms: u64,
        /// Configured commit delay.
        delay_ms: u64,
    },

    /// The customer base URL is not an http(s) URL with a host.
    #[error("Invalid customer base URL: '{0}'")]
    InvalidBaseUrl(String),

    /// The cold-chain bounds are inverted.
    #[error("Invalid cold-chain policy: {0}")]
    ColdChain(String),

    /// The log subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    Telemetry(String),
}

/// Settings for the FreshChain runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Log filter (trace, debug, info, warn, error or an `EnvFilter` directive)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Ledger deployer; holds the Admin role
    pub admin: Identity,

    /// Delay between commit and confirmation
    pub confirmation_delay: Duration,

    /// How long clients wait for confirmation
    pub confirmation_timeout: Duration,

    /// Upper temperature bound of the ledger's cold-chain policy
    pub cold_chain_max_temp: i64,

    /// Base of customer traceability links
    pub customer_base_url: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            admin: Identity::from_low_u64(1),
            confirmation_delay: Duration::from_millis(250),
            confirmation_timeout: Duration::from_millis(5000),
            cold_chain_max_temp: 40,
            customer_base_url: "http://localhost:3000".to_string(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `FC_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `FC_ADMIN_ADDRESS`: Admin identity (default: 0x00..01)
    /// - `FC_CONFIRMATION_DELAY_MS`: Commit-to-confirmation delay (default: 250)
    /// - `FC_CONFIRMATION_TIMEOUT_MS`: Client wait bound (default: 5000)
    /// - `FC_COLD_CHAIN_MAX_TEMP`: Policy upper temperature (default: 40)
    /// - `FC_CUSTOMER_BASE_URL`: Traceability link base (default: http://localhost:3000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = lookup("FC_LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or(defaults.log_level);

        let json_logs = lookup("FC_JSON_LOGS")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(defaults.json_logs);

        let admin = parse_var("FC_ADMIN_ADDRESS", lookup("FC_ADMIN_ADDRESS"), defaults.admin)?;

        let delay_ms = parse_var(
            "FC_CONFIRMATION_DELAY_MS",
            lookup("FC_CONFIRMATION_DELAY_MS"),
            defaults.confirmation_delay.as_millis() as u64,
        )?;

        let timeout_ms = parse_var(
            "FC_CONFIRMATION_TIMEOUT_MS",
            lookup("FC_CONFIRMATION_TIMEOUT_MS"),
            defaults.confirmation_timeout.as_millis() as u64,
        )?;

        let cold_chain_max_temp = parse_var(
            "FC_COLD_CHAIN_MAX_TEMP",
            lookup("FC_COLD_CHAIN_MAX_TEMP"),
            defaults.cold_chain_max_temp,
        )?;

        let customer_base_url = lookup("FC_CUSTOMER_BASE_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.customer_base_url);

        Ok(Self {
            log_level,
            json_logs,
            admin,
            confirmation_delay: Duration::from_millis(delay_ms),
            confirmation_timeout: Duration::from_millis(timeout_ms),
            cold_chain_max_temp,
            customer_base_url,
        })
    }

    /// Reject settings the runtime cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.is_zero() {
            return Err(ConfigError::ZeroAdmin);
        }
        if self.confirmation_timeout < self.confirmation_delay {
            return Err(ConfigError::TimeoutShorterThanDelay {
                timeout_ms: self.confirmation_timeout.as_millis() as u64,
                delay_ms: self.confirmation_delay.as_millis() as u64,
            });
        }

        let host = self
            .customer_base_url
            .strip_prefix("https://")
            .or_else(|| self.customer_base_url.strip_prefix("http://"));
        match host {
            Some(rest) if !rest.is_empty() && !rest.starts_with('/') && !rest.contains(' ') => {}
            _ => return Err(ConfigError::InvalidBaseUrl(self.customer_base_url.clone())),
        }

        self.cold_chain_policy().map(|_| ())
    }

    /// The ledger-side cold-chain policy.
    pub fn cold_chain_policy(&self) -> Result<ColdChainPolicy, ConfigError> {
        ColdChainPolicy::with_max_temperature(self.cold_chain_max_temp)
            .map_err(|e| ConfigError::ColdChain(e.to_string()))
    }

    /// Settings for an in-memory ledger.
    pub fn ledger_config(&self) -> Result<LedgerConfig, ConfigError> {
        Ok(LedgerConfig {
            admin: self.admin,
            confirmation_delay: self.confirmation_delay,
            cold_chain: self.cold_chain_policy()?,
        })
    }

    /// How long clients wait for confirmation.
    pub fn confirmation_policy(&self) -> ConfirmationPolicy {
        ConfirmationPolicy {
            timeout: self.confirmation_timeout,
        }
    }
}
