//! Error types for the engine
//!
//! Non-matches and stale fixes are not errors; they surface as empty
//! results and no-ops. Only cancellation and host-facing problems
//! (configuration, internal invariants) travel through this type.

use thiserror::Error;

/// Main error type for engine operations
#[derive(Debug, Error)]
pub enum AutopropError {
    /// The batch was canceled; no partial multi-document state is exposed
    #[error("operation was canceled")]
    Canceled,

    /// Configuration loading or validation errors
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Rule execution errors
    #[error("rule error in '{rule_id}': {message}")]
    Rule { rule_id: String, message: String },

    /// Generic internal errors
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl AutopropError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn rule(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rule {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether processing of other documents may continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AutopropError::Rule { .. })
    }
}
