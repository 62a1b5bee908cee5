//! Error types for queuecalc.
//!
//! Every fallible operation returns `Result<T, QueueError>`; nothing in the
//! library panics on bad input.

use std::fmt;

use thiserror::Error;

/// Result type alias for queuecalc operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Queueing model a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Single-server queue.
    Mm1,
    /// Multi-server queue.
    Mms,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm1 => write!(f, "M/M/1"),
            Self::Mms => write!(f, "M/M/S"),
        }
    }
}

/// Unified error type for all queuecalc operations.
///
/// # Design
///
/// The two domain variants are closed and carry structured context so that
/// callers can branch on the offending parameter or on the computed
/// utilization instead of parsing text:
/// 1. [`QueueError::InvalidArgument`] for out-of-domain input
/// 2. [`QueueError::UnstableSystem`] when no steady state exists
#[derive(Debug, Error)]
pub enum QueueError {
    // ===== Domain Errors =====
    /// Malformed or out-of-domain input.
    #[error("invalid argument '{parameter}' = {value}: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter (e.g. `lambda`, `s`).
        parameter: &'static str,
        /// The rejected value, rendered as text.
        value: String,
        /// What constraint was violated.
        reason: String,
    },

    /// Utilization is at or above one, so the queue grows without bound.
    #[error("unstable {model} system: rho = {rho:.6} >= 1 (arrivals outpace service capacity)")]
    UnstableSystem {
        /// Model that was evaluated.
        model: ModelKind,
        /// Computed utilization.
        rho: f64,
    },

    // ===== Configuration Errors =====
    /// Invalid scenario configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl QueueError {
    /// Create an invalid-argument error.
    #[must_use]
    pub fn invalid_argument(
        parameter: &'static str,
        value: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            parameter,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an unstable-system error.
    #[must_use]
    pub const fn unstable(model: ModelKind, rho: f64) -> Self {
        Self::UnstableSystem { model, rho }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error was caused by user input rather than the
    /// environment (the user can fix it by entering different numbers).
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::UnstableSystem { .. }
        )
    }

    /// Name of the offending parameter, if this is an invalid-argument error.
    #[must_use]
    pub const fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { parameter, .. } => Some(*parameter),
            _ => None,
        }
    }

    /// Computed utilization, if this is an unstable-system error.
    #[must_use]
    pub const fn rho(&self) -> Option<f64> {
        match self {
            Self::UnstableSystem { rho, .. } => Some(*rho),
            _ => None,
        }
    }
}
