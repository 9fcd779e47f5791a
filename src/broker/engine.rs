//! Broadcaster engine
//!
//! A `Broadcaster<T>` is a cloneable handle onto one named subscriber set.
//! Every clone shares the same set, so the chat stream can be handed to each
//! aggregator that listens to it.
//!
//! Concurrency and usage notes:
//! - All operations lock the set for their whole duration, so concurrent
//!   `publish`, `subscribe` and `unsubscribe` calls apply one at a time in
//!   the order the lock is taken, and every client sees values in publish
//!   order.
//! - Delivery is a channel send and never calls back into another component
//!   while the lock is held, so aggregators may subscribe and unsubscribe
//!   from inside their own critical sections without deadlocking.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use super::message::ChatMessage;
use super::topic::SubscriberSet;
use crate::client::{Client, SubscriberId};
use crate::utils::sync::lock;

pub struct Broadcaster<T> {
    name: Arc<str>,
    subscribers: Arc<Mutex<SubscriberSet<T>>>,
}

/// Broadcasts chat messages to any subscriber: polls, word clouds, Q&A,
/// moderation screens.
pub type ChatMessageBroadcaster = Broadcaster<ChatMessage>;

impl<T> Clone for Broadcaster<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T> fmt::Debug for Broadcaster<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcaster")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T> Broadcaster<T> {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            subscribers: Arc::new(Mutex::new(SubscriberSet::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `client`. Subscribing the same id twice is a no-op.
    pub fn subscribe(&self, client: Client<T>) -> SubscriberId {
        let id = client.id;
        let mut subscribers = lock(&self.subscribers);
        if subscribers.subscribe(client) {
            info!("+1 {} subscriber (={})", self.name, subscribers.len());
        }
        id
    }

    /// Unregister `id`. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: &SubscriberId) {
        let mut subscribers = lock(&self.subscribers);
        if subscribers.unsubscribe(id) {
            info!("-1 {} subscriber (={})", self.name, subscribers.len());
        }
    }

    pub fn is_subscribed(&self, id: &SubscriberId) -> bool {
        lock(&self.subscribers).contains(id)
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }
}

impl<T: Clone> Broadcaster<T> {
    /// Deliver `value` to every current subscriber.
    pub fn publish(&self, value: T) {
        let mut subscribers = lock(&self.subscribers);
        let dropped = subscribers.deliver(&value);
        if dropped > 0 {
            debug!(
                "-{dropped} disconnected {} subscriber(s) (={})",
                self.name,
                subscribers.len()
            );
        }
    }
}

impl Broadcaster<ChatMessage> {
    pub fn new_message(&self, msg: ChatMessage) {
        info!("Received {} message - {msg}", self.name);
        self.publish(msg);
    }
}
