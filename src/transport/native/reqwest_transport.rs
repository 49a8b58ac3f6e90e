use crate::prelude::*;
use std::sync::OnceLock;
use tokio::runtime::Runtime;
use tokio::task::AbortHandle;

static RUNTIME: OnceLock<Result<Runtime, String>> = OnceLock::new();

/// The runtime every [`ReqwestTransport`] spawns its requests on. Lives for
/// the whole process, so transports can be dropped from async contexts.
fn shared_runtime() -> Result<&'static Runtime, TransportConfigError> {
    RUNTIME
        .get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .thread_name("reqpub-transport")
                .build()
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|reason| TransportConfigError::Runtime {
            reason: reason.clone(),
        })
}

enum InFlightEntry {
    Running(AbortHandle),
    /// Cancelled before `execute_request` got to it.
    Cancelled,
}

type InFlight = Arc<Mutex<HashMap<u64, InFlightEntry>>>;

fn lock(in_flight: &InFlight) -> MutexGuard<'_, HashMap<u64, InFlightEntry>> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An [`HttpTransport`] backed by a `reqwest` client. Every request is a task
/// on a shared tokio runtime; cancelling aborts the task, which drops the
/// connection.
///
/// HTTP status codes are never treated as errors here, so a 401 or a 500 is
/// reported as a [`TransportOutcome::Success`] carrying that status.
pub struct ReqwestTransport {
    client: reqwest::Client,
    runtime: &'static Runtime,
    in_flight: InFlight,
}

impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            runtime: shared_runtime()?,
            in_flight: InFlight::default(),
        })
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute_request(
        &self,
        request_id: u64,
        request: NetworkRequest,
        listener_rust_side: Arc<TransportOutcomeListener>,
    ) -> Result<(), TransportFailure> {
        let mut in_flight = lock(&self.in_flight);
        if matches!(in_flight.get(&request_id), Some(InFlightEntry::Cancelled)) {
            in_flight.remove(&request_id);
            drop(in_flight);
            debug!("Request #{request_id} was cancelled before it was sent");
            listener_rust_side.notify_outcome(TransportOutcome::Failure {
                status_code: None,
                error: TransportFailure::ExplicitlyCancelled,
            });
            return Ok(());
        }

        let client = self.client.clone();
        let registry = self.in_flight.clone();
        // Spawned under the lock, so the task cannot deregister itself before
        // its entry exists.
        let task = self.runtime.spawn(async move {
            let outcome = perform(&client, request).await;
            lock(&registry).remove(&request_id);
            listener_rust_side.notify_outcome(outcome);
        });
        in_flight.insert(request_id, InFlightEntry::Running(task.abort_handle()));
        Ok(())
    }

    fn cancel_request(&self, request_id: u64) {
        let mut in_flight = lock(&self.in_flight);
        match in_flight.remove(&request_id) {
            Some(InFlightEntry::Running(task)) => {
                debug!("Aborting request #{request_id}");
                task.abort();
            }
            Some(InFlightEntry::Cancelled) | None => {
                in_flight.insert(request_id, InFlightEntry::Cancelled);
            }
        }
    }
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Options => reqwest::Method::OPTIONS,
        HttpMethod::Trace => reqwest::Method::TRACE,
    }
}

async fn perform(client: &reqwest::Client, request: NetworkRequest) -> TransportOutcome {
    debug!("{} {}", request.method, request.url);
    let mut builder = client.request(method(request.method), request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = match builder.send().await {
        Ok(response) => response,
        Err(error) => {
            info!("{} {} failed: {error}", request.method, request.url);
            return TransportOutcome::Failure {
                status_code: None,
                error: classify(error),
            };
        }
    };

    let status_code = response.status().as_u16();
    match response.bytes().await {
        Ok(body) => TransportOutcome::Success {
            response: TransportResponse {
                status_code,
                body: Some(body.to_vec()),
            },
        },
        Err(error) => TransportOutcome::Failure {
            status_code: Some(status_code),
            error: classify(error),
        },
    }
}

/// Connection, timeout and send errors are session task failures, which
/// callers see as "no internet connection".
fn classify(error: reqwest::Error) -> TransportFailure {
    let reason = error.to_string();
    if error.is_connect() || error.is_timeout() || error.is_request() {
        TransportFailure::SessionTaskFailed { reason }
    } else {
        TransportFailure::Other { reason }
    }
}
