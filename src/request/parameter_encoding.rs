use crate::prelude::*;

/// Where request parameters end up: the URL query string or a JSON body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterEncoding {
    Url,
    Json,
}

impl ParameterEncoding {
    /// GET sends its parameters in the query string, every other method as
    /// a JSON body.
    pub fn for_method(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => ParameterEncoding::Url,
            _ => ParameterEncoding::Json,
        }
    }

    /// Applies `parameters` to an already percent-encoded `url`, returning the
    /// final URL and the body, if any.
    pub fn encode(
        &self,
        url: String,
        parameters: Option<&Map<String, Value>>,
    ) -> Result<(String, Option<Vec<u8>>), ConfigurationError> {
        let Some(parameters) = parameters else {
            return Ok((url, None));
        };
        match self {
            ParameterEncoding::Url => Ok((append_query(url, &query_string(parameters)), None)),
            ParameterEncoding::Json => serde_json::to_vec(parameters)
                .map(|body| (url, Some(body)))
                .map_err(|e| ConfigurationError::ParameterEncodingFailed {
                    reason: e.to_string(),
                }),
        }
    }
}

fn append_query(url: String, query: &str) -> String {
    if query.is_empty() {
        return url;
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

/// `key=value` pairs joined with `&`, keys sorted.
pub(crate) fn query_string(parameters: &Map<String, Value>) -> String {
    let mut keys: Vec<&String> = parameters.keys().collect();
    keys.sort();

    let mut components = Vec::new();
    for key in keys {
        query_components(key, &parameters[key.as_str()], &mut components);
    }
    components
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn query_components(key: &str, value: &Value, components: &mut Vec<(String, String)>) {
    match value {
        Value::Object(nested) => {
            let mut nested_keys: Vec<&String> = nested.keys().collect();
            nested_keys.sort();
            for nested_key in nested_keys {
                query_components(
                    &format!("{key}[{nested_key}]"),
                    &nested[nested_key.as_str()],
                    components,
                );
            }
        }
        Value::Array(items) => {
            for item in items {
                query_components(&format!("{key}[]"), item, components);
            }
        }
        Value::Bool(flag) => push_component(components, key, if *flag { "1" } else { "0" }),
        Value::Number(number) => push_component(components, key, &number.to_string()),
        Value::String(string) => push_component(components, key, string),
        Value::Null => push_component(components, key, ""),
    }
}

fn push_component(components: &mut Vec<(String, String)>, key: &str, value: &str) {
    components.push((
        percent_encode_query_component(key),
        percent_encode_query_component(value),
    ));
}
