use crate::prelude::*;
use std::fmt;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Fluent configuration of a single HTTP call.
///
/// Every setter mutates one field and hands back the same descriptor so calls
/// can be chained. Nothing is validated until [`RequestDescriptor::build`],
/// which snapshots the current configuration into an immutable
/// [`NetworkRequest`]; publishers only ever see that snapshot.
///
/// ```ignore
/// let mut descriptor = RequestDescriptor::new(transport);
/// let publisher = descriptor
///     .set_url("https://www.mxnzp.com/api/weather/forecast/合肥市")
///     .set_headers([("app_id", "…"), ("app_secret", "…")])
///     .publisher()?;
/// ```
#[derive(Clone)]
pub struct RequestDescriptor {
    transport: Arc<dyn HttpTransport>,
    headers: HashMap<String, String>,
    url: Option<String>,
    method: HttpMethod,
    parameters: Option<Map<String, Value>>,
}

impl RequestDescriptor {
    /// A GET descriptor with `Content-Type: application/json` and no URL.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            headers: default_headers(),
            url: None,
            method: HttpMethod::default(),
            parameters: None,
        }
    }

    /// A descriptor backed by a [`ReqwestTransport`] built from `config`.
    pub fn native(config: TransportConfig) -> Result<Self, TransportConfigError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(config)?)))
    }

    pub fn set_session_manager(&mut self, transport: Arc<dyn HttpTransport>) -> &mut Self {
        self.transport = transport;
        self
    }

    /// Adds `headers` to the current set. A name already present, compared
    /// case-insensitively, gets its value replaced.
    pub fn set_headers<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            insert_header(&mut self.headers, name.into(), value.into());
        }
        self
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    pub fn set_http_method(&mut self, method: HttpMethod) -> &mut Self {
        self.method = method;
        self
    }

    /// Replaces the parameters. How they are encoded depends on the method at
    /// build time.
    pub fn set_parameter(&mut self, parameters: Map<String, Value>) -> &mut Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn http_method(&self) -> HttpMethod {
        self.method
    }

    pub fn parameters(&self) -> Option<&Map<String, Value>> {
        self.parameters.as_ref()
    }

    pub fn session_manager(&self) -> Arc<dyn HttpTransport> {
        self.transport.clone()
    }

    pub fn build(&self) -> Result<NetworkRequest, ConfigurationError> {
        prepare_request(
            self.url.as_deref(),
            self.method,
            self.headers.clone(),
            self.parameters.as_ref(),
        )
    }

    pub fn publisher(&self) -> Result<RequestPublisher, ConfigurationError> {
        self.build()
            .map(|request| RequestPublisher::new(self.transport.clone(), request))
    }

    /// Shorthand for `publisher()?.subscribe(subscriber)`.
    pub fn subscribe(
        &self,
        subscriber: Arc<dyn Subscriber>,
    ) -> Result<Arc<Subscription>, ConfigurationError> {
        self.publisher()
            .map(|publisher| publisher.subscribe(subscriber))
    }
}


impl fmt::Debug for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

fn default_headers() -> HashMap<String, String> {
    HashMap::from_iter([(CONTENT_TYPE.to_owned(), APPLICATION_JSON.to_owned())])
}

fn insert_header(headers: &mut HashMap<String, String>, name: String, value: String) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
    headers.insert(name, value);
}

pub(crate) fn prepare_request(
    url: Option<&str>,
    method: HttpMethod,
    headers: HashMap<String, String>,
    parameters: Option<&Map<String, Value>>,
) -> Result<NetworkRequest, ConfigurationError> {
    let url = url.ok_or(ConfigurationError::MissingUrl)?;

    let encoded_url = percent_encode_url(url);
    if !is_absolute_url(&encoded_url) {
        return Err(ConfigurationError::InvalidUrl { url: encoded_url });
    }

    let (url, body) = ParameterEncoding::for_method(method).encode(encoded_url, parameters)?;

    Ok(NetworkRequest {
        url,
        method,
        headers,
        body,
    })
}

/// Builds a [`NetworkRequest`] with the same rules as [`RequestDescriptor`],
/// for hosts that cannot hand over a JSON object directly. `parameters_json`
/// must be a JSON object when present.
#[export]
pub fn new_network_request(
    url: String,
    method: HttpMethod,
    headers: HashMap<String, String>,
    parameters_json: Option<String>,
) -> Result<NetworkRequest, ConfigurationError> {
    let parameters = parameters_json
        .map(|json| match serde_json::from_str::<Value>(&json) {
            Ok(Value::Object(parameters)) => Ok(parameters),
            Ok(other) => Err(ConfigurationError::InvalidParameters {
                reason: format!("expected an object, got {other}"),
            }),
            Err(e) => Err(ConfigurationError::InvalidParameters {
                reason: e.to_string(),
            }),
        })
        .transpose()?;

    let mut merged = default_headers();
    for (name, value) in headers {
        insert_header(&mut merged, name, value);
    }

    prepare_request(Some(&url), method, merged, parameters.as_ref())
}
