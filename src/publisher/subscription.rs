use crate::prelude::*;

enum SubscriptionState {
    AwaitingDemand { subscriber: Arc<dyn Subscriber> },
    InFlight { subscriber: Arc<dyn Subscriber> },
    Terminated,
}

/// One dispatch of a [`RequestPublisher`]: owns the request snapshot and the
/// only reference to its [`Subscriber`].
///
/// The delivery path and [`Subscription::cancel`] both take the subscriber out
/// of the same mutex, so whichever runs first wins and the other finds the
/// subscription terminated.
#[derive(Object)]
pub struct Subscription {
    this: Weak<Subscription>,
    request_id: u64,
    request: NetworkRequest,
    transport: Arc<dyn HttpTransport>,
    state: Mutex<SubscriptionState>,
}

impl Subscription {
    pub(crate) fn new(
        request_id: u64,
        request: NetworkRequest,
        transport: Arc<dyn HttpTransport>,
        subscriber: Arc<dyn Subscriber>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            request_id,
            request,
            transport,
            state: Mutex::new(SubscriptionState::AwaitingDemand { subscriber }),
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, SubscriptionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forwards `result` to the subscriber, unless the subscription was
    /// cancelled or already delivered.
    pub(crate) fn receive_result(&self, result: Result<Vec<u8>, RequestError>) {
        let subscriber = {
            let mut state = self.lock_state();
            match std::mem::replace(&mut *state, SubscriptionState::Terminated) {
                SubscriptionState::InFlight { subscriber } => subscriber,
                not_in_flight => {
                    *state = not_in_flight;
                    debug!(
                        "Dropping outcome of request #{}, it is no longer in flight",
                        self.request_id
                    );
                    return;
                }
            }
        };

        match result {
            Ok(value) => {
                debug!("Request #{} delivering {} bytes", self.request_id, value.len());
                subscriber.receive_value(value);
                subscriber.receive_completion(Completion::Finished);
            }
            Err(error) => {
                debug!("Request #{} failed: {error}", self.request_id);
                subscriber.receive_completion(Completion::Failure { error });
            }
        }
    }
}

#[export]
impl Subscription {
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn is_terminated(&self) -> bool {
        matches!(*self.lock_state(), SubscriptionState::Terminated)
    }

    /// Starts the HTTP call on the first non-zero demand. Later demands, and
    /// demands after cancellation, do nothing.
    ///
    /// A zero demand breaks the subscriber contract; it is logged and ignored.
    pub fn request(&self, demand: Demand) {
        if demand.is_zero() {
            warn!(
                "Request #{} received a zero demand, which is not allowed",
                self.request_id
            );
            return;
        }
        let Some(this) = self.this.upgrade() else {
            return;
        };

        {
            let mut state = self.lock_state();
            let subscriber = match &*state {
                SubscriptionState::AwaitingDemand { subscriber } => subscriber.clone(),
                _ => return,
            };
            *state = SubscriptionState::InFlight { subscriber };
        }

        debug!(
            "Request #{} dispatching {} {}",
            self.request_id, self.request.method, self.request.url
        );
        let listener = Arc::new(TransportOutcomeListener::new(this));
        if let Err(error) =
            self.transport
                .execute_request(self.request_id, self.request.clone(), listener.clone())
        {
            warn!("Transport refused request #{}: {error}", self.request_id);
            listener.notify_outcome(TransportOutcome::Failure {
                status_code: None,
                error,
            });
        }
    }

    /// Stops delivery and releases the subscriber. If the call is in flight the
    /// transport is asked to abort it. Idempotent.
    pub fn cancel(&self) {
        let previous = std::mem::replace(&mut *self.lock_state(), SubscriptionState::Terminated);
        match previous {
            SubscriptionState::InFlight { .. } => {
                debug!("Request #{} cancelled while in flight", self.request_id);
                self.transport.cancel_request(self.request_id);
            }
            SubscriptionState::AwaitingDemand { .. } => {
                debug!("Request #{} cancelled before demand", self.request_id);
            }
            SubscriptionState::Terminated => {}
        }
    }
}
