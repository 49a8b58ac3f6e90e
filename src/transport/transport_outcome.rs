use crate::prelude::*;

/// The only status code the publisher interprets; every other status is
/// handed to the subscriber as a value.
pub const HTTP_STATUS_UNAUTHORIZED: u16 = 401;

/// The single result a [`HttpTransport`] reports for one request.
#[derive(Enum, Clone, Debug, PartialEq, Eq)]
pub enum TransportOutcome {
    Success {
        response: TransportResponse,
    },
    /// `status_code` is set when a response arrived but the transport still
    /// classified the call as failed.
    Failure {
        status_code: Option<u16>,
        error: TransportFailure,
    },
}

impl TransportOutcome {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportOutcome::Success { response } => Some(response.status_code),
            TransportOutcome::Failure { status_code, .. } => *status_code,
        }
    }
}

impl From<TransportOutcome> for Result<Vec<u8>, RequestError> {
    /// 401 wins over everything, even a transport that classified the call as
    /// failed. Session task failures become
    /// [`RequestError::NoInternetConnection`], any other failure is passed
    /// through untouched.
    fn from(value: TransportOutcome) -> Self {
        if value.status_code() == Some(HTTP_STATUS_UNAUTHORIZED) {
            return Err(RequestError::Unauthorized);
        }
        match value {
            TransportOutcome::Success { response } => Ok(response.body.unwrap_or_default()),
            TransportOutcome::Failure { error, .. } if error.is_session_task_failed() => {
                Err(RequestError::NoInternetConnection)
            }
            TransportOutcome::Failure { error, .. } => Err(error.into()),
        }
    }
}
