use crate::prelude::*;

/// Bridges a subscription to a tokio oneshot channel: a single send of the
/// final result, to a single receiver.
pub(crate) struct OneshotSubscriber {
    value: Mutex<Option<Vec<u8>>>,
    sender: Mutex<Option<Sender<Result<Vec<u8>, RequestError>>>>,
}

impl OneshotSubscriber {
    pub(crate) fn new(sender: Sender<Result<Vec<u8>, RequestError>>) -> Self {
        Self {
            value: Mutex::new(None),
            sender: Mutex::new(Some(sender)),
        }
    }
}

impl Subscriber for OneshotSubscriber {
    fn receive_subscription(&self, _subscription: Arc<Subscription>) {}

    fn receive_value(&self, value: Vec<u8>) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }

    fn receive_completion(&self, completion: Completion) {
        let result = match completion {
            Completion::Finished => Ok(self
                .value
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
                .unwrap_or_default()),
            Completion::Failure { error } => Err(error),
        };
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(sender) = sender {
            // The receiving future may already be gone.
            let _ = sender.send(result);
        }
    }
}
