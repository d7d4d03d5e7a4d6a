//! Error types for the betting simulator
//!
//! Leaf errors derive `thiserror::Error`; `SimError` is the root type the
//! binaries and the config loader return.

use std::fmt;
use std::error::Error as StdError;

/// Root error type for all simulator operations
#[derive(Debug)]
pub enum SimError {
    /// Configuration related errors
    Configuration(ConfigurationError),

    /// Bet placement and ledger errors
    Betting(BettingError),

    /// A round could not be resolved
    Round(RoundError),

    /// Console or file I/O errors
    Io(std::io::Error),

    /// Report or round record could not be encoded
    Serialization(serde_json::Error),
}

/// Configuration and validation errors
#[derive(Debug)]
pub enum ConfigurationError {
    ValidationFailed(String),
    InvalidValue { field: String, value: String, reason: String },
    LoadFailed(String),
    SaveFailed(String),
}

/// Ledger errors. All are recoverable by the session loop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BettingError {
    #[error("invalid amount: {amount:.2}")]
    InvalidAmount { amount: f64 },

    #[error("insufficient balance: requested {requested:.2}, available {available:.2}")]
    InsufficientBalance { requested: f64, available: f64 },

    #[error("crediting {amount:e} to balance {balance:.2} would overflow")]
    BalanceOverflow { balance: f64, amount: f64 },
}

/// The uniform random source could not produce a value
#[derive(Debug, thiserror::Error)]
#[error("random source failed: {0}")]
pub struct RandomSourceError(pub String);

/// Failure while playing a single round. Aborts that round only.
#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    #[error("bet rejected: {0}")]
    Betting(#[from] BettingError),

    #[error("round aborted: {0}")]
    RandomSource(#[from] RandomSourceError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Configuration(e) => write!(f, "Configuration error: {}", e),
            SimError::Betting(e) => write!(f, "Betting error: {}", e),
            SimError::Round(e) => write!(f, "Round error: {}", e),
            SimError::Io(e) => write!(f, "I/O error: {}", e),
            SimError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::ValidationFailed(msg) => write!(f, "Validation failed: {}", msg),
            ConfigurationError::InvalidValue { field, value, reason } => {
                write!(f, "Invalid value for {}: '{}' ({})", field, value, reason)
            }
            ConfigurationError::LoadFailed(msg) => write!(f, "Failed to load configuration: {}", msg),
            ConfigurationError::SaveFailed(msg) => write!(f, "Failed to save configuration: {}", msg),
        }
    }
}

impl StdError for SimError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SimError::Configuration(e) => Some(e),
            SimError::Betting(e) => Some(e),
            SimError::Round(e) => Some(e),
            SimError::Io(e) => Some(e),
            SimError::Serialization(e) => Some(e),
        }
    }
}

impl StdError for ConfigurationError {}

impl From<ConfigurationError> for SimError {
    fn from(e: ConfigurationError) -> Self {
        SimError::Configuration(e)
    }
}

impl From<BettingError> for SimError {
    fn from(e: BettingError) -> Self {
        SimError::Betting(e)
    }
}

impl From<RoundError> for SimError {
    fn from(e: RoundError) -> Self {
        SimError::Round(e)
    }
}

impl From<RandomSourceError> for SimError {
    fn from(e: RandomSourceError) -> Self {
        SimError::Round(RoundError::RandomSource(e))
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Serialization(e)
    }
}

// Convenience type alias for Results
pub type SimResult<T> = Result<T, SimError>;
