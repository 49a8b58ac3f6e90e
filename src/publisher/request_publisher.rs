use crate::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

fn next_request_id() -> u64 {
    NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed)
}

/// Publishes the response body of one HTTP call per subscription: zero or one
/// value, then exactly one completion.
///
/// Holds an immutable [`NetworkRequest`] snapshot, so it can be subscribed to
/// any number of times, each subscription issuing its own call.
#[derive(Object)]
pub struct RequestPublisher {
    transport: Arc<dyn HttpTransport>,
    request: NetworkRequest,
}

impl RequestPublisher {
    pub fn network_request(&self) -> &NetworkRequest {
        &self.request
    }
}

#[export]
impl RequestPublisher {
    #[uniffi::constructor]
    pub fn new(transport: Arc<dyn HttpTransport>, request: NetworkRequest) -> Self {
        Self { transport, request }
    }

    /// Hands a fresh [`Subscription`] to `subscriber` before anything else
    /// happens, and returns it. No call is made until the subscription
    /// receives a non-zero [`Demand`].
    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>) -> Arc<Subscription> {
        let subscription = Subscription::new(
            next_request_id(),
            self.request.clone(),
            self.transport.clone(),
            subscriber.clone(),
        );
        subscriber.receive_subscription(subscription.clone());
        subscription
    }

    /// Subscribes, requests the value and waits for the single result.
    ///
    /// Dropping the returned future cancels the request.
    pub async fn response(&self) -> Result<Vec<u8>, RequestError> {
        let (sender, receiver) = channel();
        let subscription = self.subscribe(Arc::new(OneshotSubscriber::new(sender)));
        let _cancel_on_drop = CancelOnDrop(subscription.clone());

        subscription.request(Demand::Unlimited);

        receiver
            .await
            .map_err(|_| RequestError::FailedToReceiveTransportOutcome)?
    }
}

struct CancelOnDrop(Arc<Subscription>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
