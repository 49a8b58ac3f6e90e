use crate::prelude::*;

/// An immutable, fully encoded HTTP request handed to a [`HttpTransport`].
///
/// The `url` is already percent-encoded and, for GET, carries the encoded
/// parameters in its query string. For every other method the parameters
/// travel as a JSON `body`.
#[derive(Record, Clone, Debug, PartialEq, Eq)]
pub struct NetworkRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl NetworkRequest {
    /// Looks up a header, comparing names case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
