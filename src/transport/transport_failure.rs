use crate::prelude::*;
use thiserror::Error as ThisError;

/// A failure reported by a [`HttpTransport`].
#[derive(Debug, PartialEq, Eq, Clone, ThisError, Error, enum_as_inner::EnumAsInner)]
pub enum TransportFailure {
    /// The underlying session task failed: no connectivity, DNS failure,
    /// connection refused, timeout.
    #[error("Session task failed with error: {reason}")]
    SessionTaskFailed { reason: String },

    #[error("Request explicitly cancelled")]
    ExplicitlyCancelled,

    #[error("Response validation failed: {reason}")]
    ResponseValidationFailed { reason: String },

    #[error("Transport failed: {reason}")]
    Other { reason: String },
}
