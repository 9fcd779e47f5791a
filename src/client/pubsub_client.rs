//! Client representation
//!
//! `Client` models a subscriber and holds the sending side of a per-client
//! channel used by broadcasters and aggregators to push values. Two clients
//! with the same `id` are the same subscriber: registering it twice is a
//! no-op and unregistering by `id` removes it.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

pub type SubscriberId = Uuid;

#[derive(Debug)]
pub struct Client<T> {
    pub id: SubscriberId,
    pub sender: UnboundedSender<T>,
}

impl<T> Client<T> {
    /// Create a new client with a sender channel. The `id` is a fresh UUID.
    pub fn new(sender: UnboundedSender<T>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
        }
    }

    /// Create a client together with the receiver its deliveries arrive on.
    pub fn channel() -> (Self, UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Hands `value` to the client. Returns `false` once the receiving side
    /// is gone, which callers treat as the client having disconnected.
    pub fn send(&self, value: T) -> bool {
        self.sender.send(value).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            sender: self.sender.clone(),
        }
    }
}
