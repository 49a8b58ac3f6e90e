const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Unreserved characters, sub-delimiters and `:@/?`, the set Foundation
/// calls `urlQueryAllowed`.
fn is_url_query_allowed(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"-._~!$&'()*+,;=:@/?".contains(&byte)
}

/// `urlQueryAllowed` minus the general and sub delimiters, keeping `?` and
/// `/`. Used for keys and values inside a query string.
fn is_query_component_allowed(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"-._~/?".contains(&byte)
}

fn encode_with(input: &str, is_allowed: impl Fn(u8) -> bool) -> String {
    let mut encoded = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        if is_allowed(byte) {
            encoded.push(byte as char);
        } else {
            encoded.push('%');
            encoded.push(HEX[(byte >> 4) as usize] as char);
            encoded.push(HEX[(byte & 0x0f) as usize] as char);
        }
    }
    encoded
}

/// Percent-encodes a whole URL string. `%` itself is not allowed, so an
/// already escaped URL gets escaped again.
pub(crate) fn percent_encode_url(url: &str) -> String {
    encode_with(url, is_url_query_allowed)
}

pub(crate) fn percent_encode_query_component(component: &str) -> String {
    encode_with(component, is_query_component_allowed)
}

/// Parses as an absolute URL with a host, e.g. `https://example.com/path`.
pub(crate) fn is_absolute_url(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|url| url.has_host())
}
