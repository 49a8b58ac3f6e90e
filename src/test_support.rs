use crate::prelude::*;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

enum Behaviour {
    /// Keep the listener until the test fires an outcome.
    Hold,
    Complete(TransportOutcome),
    DropListener,
    Refuse(TransportFailure),
}

/// A transport that records what it is asked to do and lets the test decide
/// when, and whether, an outcome arrives.
pub(crate) struct MockTransport {
    behaviour: Behaviour,
    requests: Mutex<Vec<(u64, NetworkRequest)>>,
    listeners: Mutex<HashMap<u64, Arc<TransportOutcomeListener>>>,
    cancelled: Mutex<Vec<u64>>,
}

impl MockTransport {
    fn with_behaviour(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            requests: Mutex::new(Vec::new()),
            listeners: Mutex::new(HashMap::new()),
            cancelled: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn new() -> Self {
        Self::with_behaviour(Behaviour::Hold)
    }

    pub(crate) fn completing_with(outcome: TransportOutcome) -> Self {
        Self::with_behaviour(Behaviour::Complete(outcome))
    }

    pub(crate) fn dropping_listeners() -> Self {
        Self::with_behaviour(Behaviour::DropListener)
    }

    pub(crate) fn refusing(failure: TransportFailure) -> Self {
        Self::with_behaviour(Behaviour::Refuse(failure))
    }

    pub(crate) fn request() -> NetworkRequest {
        NetworkRequest {
            url: "https://example.com/api/weather".to_owned(),
            method: HttpMethod::Get,
            headers: HashMap::from_iter([(
                CONTENT_TYPE.to_owned(),
                APPLICATION_JSON.to_owned(),
            )]),
            body: None,
        }
    }

    pub(crate) fn ok(body: &[u8]) -> TransportOutcome {
        TransportOutcome::Success {
            response: TransportResponse {
                status_code: 200,
                body: Some(body.to_vec()),
            },
        }
    }

    pub(crate) fn requests(&self) -> Vec<(u64, NetworkRequest)> {
        lock(&self.requests).clone()
    }

    pub(crate) fn cancelled(&self) -> Vec<u64> {
        lock(&self.cancelled).clone()
    }

    pub(crate) fn listener(&self, request_id: u64) -> Option<Arc<TransportOutcomeListener>> {
        lock(&self.listeners).get(&request_id).cloned()
    }

    /// Fires `outcome` for `request_id`, even if it was cancelled.
    pub(crate) fn complete(&self, request_id: u64, outcome: TransportOutcome) {
        let listener = lock(&self.listeners).remove(&request_id);
        if let Some(listener) = listener {
            listener.notify_outcome(outcome);
        }
    }

    pub(crate) fn drop_listener(&self, request_id: u64) {
        let listener = lock(&self.listeners).remove(&request_id);
        drop(listener);
    }
}

impl HttpTransport for MockTransport {
    fn execute_request(
        &self,
        request_id: u64,
        request: NetworkRequest,
        listener_rust_side: Arc<TransportOutcomeListener>,
    ) -> Result<(), TransportFailure> {
        if let Behaviour::Refuse(failure) = &self.behaviour {
            return Err(failure.clone());
        }
        lock(&self.requests).push((request_id, request));
        match &self.behaviour {
            Behaviour::Hold => {
                lock(&self.listeners).insert(request_id, listener_rust_side);
            }
            Behaviour::Complete(outcome) => listener_rust_side.notify_outcome(outcome.clone()),
            Behaviour::DropListener | Behaviour::Refuse(_) => {}
        }
        Ok(())
    }

    fn cancel_request(&self, request_id: u64) {
        lock(&self.cancelled).push(request_id);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Subscribed,
    Value(Vec<u8>),
    Completion(Completion),
}

/// Records every signal it receives, in order.
pub(crate) struct RecordingSubscriber {
    demand_on_subscribe: Option<Demand>,
    cancel_on_value: bool,
    subscription: Mutex<Option<Arc<Subscription>>>,
    events: Mutex<Vec<Event>>,
}

impl RecordingSubscriber {
    fn with(demand_on_subscribe: Option<Demand>, cancel_on_value: bool) -> Self {
        Self {
            demand_on_subscribe,
            cancel_on_value,
            subscription: Mutex::new(None),
            events: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn new() -> Self {
        Self::with(None, false)
    }

    pub(crate) fn demanding(demand: Demand) -> Self {
        Self::with(Some(demand), false)
    }

    pub(crate) fn cancelling_on_value() -> Self {
        Self::with(None, true)
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        lock(&self.events).clone()
    }
}

impl Subscriber for RecordingSubscriber {
    fn receive_subscription(&self, subscription: Arc<Subscription>) {
        lock(&self.events).push(Event::Subscribed);
        *lock(&self.subscription) = Some(subscription.clone());
        if let Some(demand) = self.demand_on_subscribe {
            subscription.request(demand);
        }
    }

    fn receive_value(&self, value: Vec<u8>) {
        lock(&self.events).push(Event::Value(value));
        if self.cancel_on_value {
            let subscription = lock(&self.subscription).clone();
            if let Some(subscription) = subscription {
                subscription.cancel();
            }
        }
    }

    fn receive_completion(&self, completion: Completion) {
        lock(&self.events).push(Event::Completion(completion));
    }
}
