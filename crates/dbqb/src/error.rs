//! Error types for dbqb

use crate::action::Action;
use crate::sanitize::InputKind;
use thiserror::Error;

/// Result type alias for dbqb operations
pub type QbResult<T> = Result<T, QbError>;

/// Error types for statement construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QbError {
    /// No table was set before building
    #[error("Table name not specified")]
    MissingTable,

    /// No action was set before building
    #[error("Statement action not specified")]
    MissingAction,

    /// INSERT/UPDATE without any field/value pairs
    #[error("Insert and update statements require at least one field value")]
    MissingFieldValues,

    /// Text that does not name a known action
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Text that does not name a known conjunction
    #[error("Unknown conjunction: {0}")]
    UnknownConjunction(String),

    /// Text that does not name a known operator
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Text that does not name a known order direction
    #[error("Unknown order direction: {0}")]
    UnknownOrder(String),

    /// No main clause exists for this action
    #[error("Cannot create a main clause for action '{0}'")]
    UnsupportedAction(Action),

    /// Rejected by the sanitizer
    #[error("Unsafe {kind} input: {reason}")]
    UnsafeInput {
        kind: InputKind,
        input: String,
        reason: String,
    },

    /// Invalid argument (e.g. an empty composite condition)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The builder already produced a statement and must be reset
    #[error("Statement already built; call reset() before reusing the builder")]
    AlreadyBuilt,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QbError {
    /// Create an unsafe-input error
    pub fn unsafe_input(
        kind: InputKind,
        input: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsafeInput {
            kind,
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error came from the sanitizer rejecting input.
    ///
    /// This is the one failure expected on ordinary untrusted input; every
    /// other kind points at a bug in the calling code.
    pub fn is_unsafe_input(&self) -> bool {
        matches!(self, Self::UnsafeInput { .. })
    }

    /// Check if this error indicates misuse of the builder
    pub fn is_misuse(&self) -> bool {
        !matches!(self, Self::UnsafeInput { .. } | Self::Config(_))
    }

    /// Stable numeric code for this error kind.
    pub fn code(&self) -> u16 {
        match self {
            Self::UnknownAction(_) => 1,
            Self::UnknownConjunction(_) => 2,
            Self::UnknownOperator(_) => 3,
            Self::UnknownOrder(_) => 4,
            Self::UnsupportedAction(_) => 5,
            Self::MissingTable => 6,
            Self::MissingAction => 7,
            Self::MissingFieldValues => 8,
            Self::UnsafeInput { .. } => 9,
            Self::InvalidArgument(_) => 10,
            Self::AlreadyBuilt => 11,
            Self::Config(_) => 12,
        }
    }
}
