use crate::prelude::*;

/// An object representing that Rust is listening on the outcome of a request
/// carried out by a [`HttpTransport`]. When the transport has finished the
/// request, either successfully or with failure, it passes back the outcome by
/// calling `notify_outcome`. This is effectively a callback pattern.
///
/// If the transport drops the listener without ever notifying it, the
/// subscription fails with [`RequestError::FailedToReceiveTransportOutcome`].
#[derive(Object)]
pub struct TransportOutcomeListener {
    subscription: Mutex<Option<Arc<Subscription>>>,
}

impl TransportOutcomeListener {
    pub(crate) fn new(subscription: Arc<Subscription>) -> Self {
        Self {
            subscription: Mutex::new(Some(subscription)),
        }
    }

    fn take_subscription(&self) -> Option<Arc<Subscription>> {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

#[export]
impl TransportOutcomeListener {
    /// Called by the transport exactly once per request. Later calls are
    /// ignored.
    pub fn notify_outcome(&self, outcome: TransportOutcome) {
        match self.take_subscription() {
            Some(subscription) => subscription.receive_result(outcome.into()),
            None => warn!("Transport notified the same listener more than once, ignoring {outcome:?}"),
        }
    }
}

impl Drop for TransportOutcomeListener {
    fn drop(&mut self) {
        if let Some(subscription) = self.take_subscription() {
            subscription.receive_result(Err(RequestError::FailedToReceiveTransportOutcome));
        }
    }
}
