//! Subscriber management
//!
//! A `SubscriberSet` holds the clients registered with one broadcaster or
//! aggregator, in registration order. Subscriptions are keyed by
//! `SubscriberId`; duplicate subscriptions are a no-op.
//!
//! Concurrency note: callers must synchronize access to a `SubscriberSet`
//! (each owner keeps it behind its own lock). Delivery is a non-blocking
//! channel send, so holding that lock while delivering never waits on a
//! subscriber.

use tracing::debug;

use crate::client::{Client, SubscriberId};

#[derive(Debug)]
pub struct SubscriberSet<T> {
    clients: Vec<Client<T>>,
}

impl<T> Default for SubscriberSet<T> {
    fn default() -> Self {
        Self {
            clients: Vec::new(),
        }
    }
}

impl<T> SubscriberSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a client. Returns `false` if a client with the same id is
    /// already registered.
    pub fn subscribe(&mut self, client: Client<T>) -> bool {
        if self.contains(&client.id) {
            return false;
        }
        self.clients.push(client);
        true
    }

    /// Remove a client. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: &SubscriberId) -> bool {
        let before = self.clients.len();
        self.clients.retain(|client| client.id != *id);
        self.clients.len() != before
    }

    pub fn contains(&self, id: &SubscriberId) -> bool {
        self.clients.iter().any(|client| client.id == *id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn clear(&mut self) {
        self.clients.clear();
    }
}

impl<T: Clone> SubscriberSet<T> {
    /// Send `value` to every client in registration order. Clients whose
    /// receiver has been dropped are unregistered; returns how many were.
    pub fn deliver(&mut self, value: &T) -> usize {
        let before = self.clients.len();
        self.clients.retain(|client| {
            let delivered = client.send(value.clone());
            if !delivered {
                debug!("Dropping disconnected subscriber {}", client.id);
            }
            delivered
        });
        before - self.clients.len()
    }
}
