use crate::prelude::*;

/// Whatever actually performs HTTP calls, e.g. an `Alamofire.Session` or a
/// `URLSession` wrapper on the host (Swift) side, or [`ReqwestTransport`] in Rust.
///
/// Must support concurrent, independent requests.
#[uniffi::export(with_foreign)]
pub trait HttpTransport: Send + Sync {
    /// Starts `request` and returns immediately. When the call finishes,
    /// successfully or not, the transport MUST report back exactly once using
    /// `listener_rust_side.notify_outcome`, from any thread.
    ///
    /// Returning `Err` means the request was never started; the listener must
    /// then not be notified.
    fn execute_request(
        &self,
        request_id: u64,
        request: NetworkRequest,
        listener_rust_side: Arc<TransportOutcomeListener>,
    ) -> Result<(), TransportFailure>;

    /// Aborts the request with `request_id`. A no-op if the request already
    /// finished or is unknown.
    fn cancel_request(&self, request_id: u64);
}
