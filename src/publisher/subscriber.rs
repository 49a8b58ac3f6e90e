use crate::prelude::*;

/// The single consumer of a [`RequestPublisher`] subscription.
///
/// Receives its [`Subscription`] first, then, once it has requested a non-zero
/// [`Demand`], at most one value followed by exactly one [`Completion`]. Nothing
/// at all arrives after the subscription is cancelled.
#[uniffi::export(with_foreign)]
pub trait Subscriber: Send + Sync {
    fn receive_subscription(&self, subscription: Arc<Subscription>);
    fn receive_value(&self, value: Vec<u8>);
    fn receive_completion(&self, completion: Completion);
}
