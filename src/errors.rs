use thiserror::Error;

/// Failures of a single capability dispatch.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    #[error("Capability not found: {0}")]
    NotFound(String),

    #[error("Invalid function: {0}")]
    InvalidFunction(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] ArgumentError),

    #[error("Capability execution failed: {0}")]
    HandlerFailure(String),
}

/// Why a call intent's arguments were rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    /// The raw argument text could not be decoded into an object
    #[error("could not decode arguments {raw:?}: {reason}")]
    Malformed { raw: String, reason: String },

    /// A supplied field failed its declared type check
    #[error("field '{field}' is invalid")]
    InvalidField { field: String, description: String },

    /// A supplied field is not declared by the capability
    #[error("field '{0}' is not declared")]
    UnknownField(String),
}

pub type CapabilityResult<T> = Result<T, CapabilityError>;
