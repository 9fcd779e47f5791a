use tracing::info;

use super::engine::Broadcaster;
use super::message::Transcript;
use crate::client::{Client, SubscriberId};

/// Re-emits live transcription lines to every subscriber.
///
/// Captions are a live stream, not state: nothing is replayed to a client
/// that subscribes late.
#[derive(Debug, Clone)]
pub struct TranscriptionBroadcaster {
    inner: Broadcaster<Transcript>,
}

impl Default for TranscriptionBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptionBroadcaster {
    pub fn new() -> Self {
        Self {
            inner: Broadcaster::new("transcription"),
        }
    }

    pub fn new_transcription_text(&self, text: impl Into<String>) {
        let text = text.into();
        info!("Received transcription text - {text}");
        self.inner.publish(Transcript { text });
    }

    pub fn subscribe(&self, client: Client<Transcript>) -> SubscriberId {
        self.inner.subscribe(client)
    }

    pub fn unsubscribe(&self, id: &SubscriberId) {
        self.inner.unsubscribe(id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscriber_count()
    }
}
