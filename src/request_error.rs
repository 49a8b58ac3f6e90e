use crate::prelude::*;
use thiserror::Error as ThisError;

/// The failure a [`Subscriber`] receives when a request terminates without a
/// value.
#[derive(Debug, PartialEq, Eq, Clone, ThisError, Error, enum_as_inner::EnumAsInner)]
pub enum RequestError {
    /// The server answered with HTTP 401, checked before anything else.
    #[error("Access is denied. User is unauthorized.")]
    Unauthorized,

    /// The transport reported a session/task level failure, e.g. no
    /// connectivity or a DNS failure.
    #[error("Please check your internet connection and try again later.")]
    NoInternetConnection,

    #[error(transparent)]
    Transport {
        #[from]
        error: TransportFailure,
    },

    /// The transport released its listener without ever reporting an outcome.
    #[error("Failed to receive an outcome from the transport")]
    FailedToReceiveTransportOutcome,
}
