use crate::prelude::*;
use thiserror::Error as ThisError;

/// A request could not be built from its configuration. Raised at the
/// boundary, before anything is sent.
#[derive(Debug, PartialEq, Eq, Clone, ThisError, Error)]
pub enum ConfigurationError {
    #[error("No URL was set on the request descriptor")]
    MissingUrl,

    #[error("Not an absolute URL after percent-encoding: '{url}'")]
    InvalidUrl { url: String },

    #[error("Request parameters must be a JSON object: {reason}")]
    InvalidParameters { reason: String },

    #[error("Failed to encode request parameters: {reason}")]
    ParameterEncodingFailed { reason: String },
}
