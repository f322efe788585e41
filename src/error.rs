//! Error types for the reconciliation crate.
//!
//! Merging and scoring never fail. Errors only come from reading a
//! [`Nullable`](crate::Nullable) that holds no value, and from the identifier
//! generation helpers in [`identity`](crate::identity).

use thiserror::Error;

/// Failure to read a value out of a [`Nullable`](crate::Nullable).
///
/// The two kinds are kept apart so callers can react differently: an
/// unspecified field usually means "leave the stored value alone", while an
/// explicit null means "clear it".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NullableError {
    /// The field was explicitly set to `null`.
    #[error("value is null")]
    Null,

    /// The field was never set.
    #[error("value is not specified")]
    Unspecified,
}

/// Failure while assigning identifiers to a resource.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The generator could not produce an identifier.
    #[error("failed to generate new identifier: {reason}")]
    GenerationFailed {
        /// Generator-specific description of the failure
        reason: String,
    },

    /// No generator was supplied where one is required.
    #[error("generator must be not nil")]
    MissingGenerator,
}

/// Crate-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// See [`NullableError`]
    #[error(transparent)]
    Nullable(#[from] NullableError),

    /// See [`IdError`]
    #[error(transparent)]
    Id(#[from] IdError),
}

/// Result type for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
