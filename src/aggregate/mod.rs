//! Aggregators derive state from the chat stream and push snapshots of it.
//!
//! An `Aggregator<S>` owns one `AggregateState` behind its own lock and
//! follows the same life cycle whatever the state is:
//!
//! - `subscribe` sends the current snapshot to the new client before
//!   registering it, so a late joiner sees the state exactly once and then
//!   every update.
//! - The first subscriber makes the aggregator subscribe to the upstream
//!   chat broadcaster; the last one leaving unsubscribes it again.
//! - Upstream messages arrive on an inbox channel drained by one Tokio task,
//!   which applies them to the state in arrival order. Accepted messages
//!   publish a new snapshot; rejected ones are forwarded to the rejected
//!   messages broadcaster.
//!
//! Locks are only ever taken aggregator first, broadcaster second, and
//! broadcasters never call back into aggregators, so the subscription chain
//! cannot deadlock.

pub mod collector;
pub mod counter;

pub use collector::{
    MessageApprovalRouter, Messages, ModeratedTextCollector, SenderFilter, TextCollector,
};
pub use counter::{ChatMessageAndTokens, Counts, SendersByTokenCounter, TokenCounts};

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use tracing::{debug, info};

use crate::broker::{ChatMessage, ChatMessageBroadcaster, SubscriberSet};
use crate::client::{Client, SubscriberId};
use crate::utils::error::Result;
use crate::utils::sync::{self, lock};

/// What an aggregator did with an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The state changed and subscribers get a new snapshot.
    Accepted,
    /// The message is passed on to the rejected messages broadcaster.
    Rejected,
}

/// State machine driven by chat messages.
pub trait AggregateState: Send + 'static {
    type Snapshot: Clone + Send + 'static;

    fn receive(&mut self, msg: &ChatMessage) -> Disposition;

    fn snapshot(&self) -> Self::Snapshot;

    /// Back to the initial empty state.
    fn clear(&mut self);
}

struct Inner<S: AggregateState> {
    state: S,
    subscribers: SubscriberSet<S::Snapshot>,
}

struct Shared<S: AggregateState> {
    name: String,
    chat_messages: ChatMessageBroadcaster,
    rejected_messages: ChatMessageBroadcaster,
    inbox: Client<ChatMessage>,
    inner: Mutex<Inner<S>>,
}

impl<S: AggregateState> Shared<S> {
    fn receive(&self, msg: ChatMessage) {
        let mut inner = lock(&self.inner);
        match inner.state.receive(&msg) {
            Disposition::Accepted => self.publish(&mut inner),
            Disposition::Rejected => {
                drop(inner);
                self.rejected_messages.new_message(msg);
            }
        }
    }

    fn publish(&self, inner: &mut Inner<S>) {
        let snapshot = inner.state.snapshot();
        let dropped = inner.subscribers.deliver(&snapshot);
        if dropped > 0 {
            info!("-{dropped} {} subscriber(s) (={})", self.name, inner.subscribers.len());
            if inner.subscribers.is_empty() {
                self.chat_messages.unsubscribe(&self.inbox.id);
            }
        }
    }
}

/// Cloneable handle onto one aggregation topic.
pub struct Aggregator<S: AggregateState> {
    shared: Arc<Shared<S>>,
}

impl<S: AggregateState> Clone for Aggregator<S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<S: AggregateState> fmt::Debug for Aggregator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("name", &self.shared.name)
            .finish_non_exhaustive()
    }
}

impl<S: AggregateState> Aggregator<S> {
    /// Wraps `state` and starts the task draining its inbox.
    ///
    /// Must be called inside a Tokio runtime; outside one this fails with
    /// `Error::Initialization`.
    pub fn spawn(
        name: &str,
        state: S,
        chat_messages: ChatMessageBroadcaster,
        rejected_messages: ChatMessageBroadcaster,
    ) -> Result<Self> {
        let (inbox, mut rx) = Client::channel();
        let shared = Arc::new(Shared {
            name: name.to_string(),
            chat_messages,
            rejected_messages,
            inbox,
            inner: Mutex::new(Inner {
                state,
                subscribers: SubscriberSet::new(),
            }),
        });

        let weak: Weak<Shared<S>> = Arc::downgrade(&shared);
        let task_name = name.to_string();
        sync::spawn(name, async move {
            while let Some(msg) = rx.recv().await {
                let Some(shared) = weak.upgrade() else {
                    break;
                };
                shared.receive(msg);
            }
            debug!("Inbox closed for {task_name}");
        })?;

        Ok(Self { shared })
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Register `client`, sending it the current snapshot first.
    ///
    /// Subscribing an id that is already registered is a no-op. A client
    /// whose receiver is already gone is not registered.
    pub fn subscribe(&self, client: Client<S::Snapshot>) -> SubscriberId {
        let id = client.id;
        let mut inner = lock(&self.shared.inner);
        if inner.subscribers.contains(&id) {
            return id;
        }
        if !client.send(inner.state.snapshot()) {
            debug!("Not registering disconnected {} subscriber {id}", self.shared.name);
            return id;
        }

        if inner.subscribers.is_empty() {
            self.shared.chat_messages.subscribe(self.shared.inbox.clone());
        }
        inner.subscribers.subscribe(client);
        info!("+1 {} subscriber (={})", self.shared.name, inner.subscribers.len());
        id
    }

    /// Unregister `id`. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: &SubscriberId) {
        let mut inner = lock(&self.shared.inner);
        if !inner.subscribers.unsubscribe(id) {
            return;
        }
        if inner.subscribers.is_empty() {
            self.shared.chat_messages.unsubscribe(&self.shared.inbox.id);
        }
        info!("-1 {} subscriber (={})", self.shared.name, inner.subscribers.len());
    }

    /// Clear the state and publish the empty snapshot.
    pub fn reset(&self) {
        let mut inner = lock(&self.shared.inner);
        inner.state.clear();
        self.shared.publish(&mut inner);
        info!("Reset {}", self.shared.name);
    }

    pub fn snapshot(&self) -> S::Snapshot {
        lock(&self.shared.inner).state.snapshot()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.shared.inner).subscribers.len()
    }

    /// Whether the aggregator is currently subscribed to its upstream.
    pub fn is_listening(&self) -> bool {
        self.shared.chat_messages.is_subscribed(&self.shared.inbox.id)
    }

    /// Apply `msg` directly, bypassing the upstream broadcaster.
    pub fn receive(&self, msg: ChatMessage) {
        self.shared.receive(msg);
    }
}
