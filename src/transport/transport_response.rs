use crate::prelude::*;

/// What a [`HttpTransport`] got back from the server.
#[derive(Record, Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status_code: u16,

    /// `None` when the server sent no body at all.
    pub body: Option<Vec<u8>>,
}
