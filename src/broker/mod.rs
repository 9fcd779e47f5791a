//! Broadcasting for raw presentation events.
//!
//! - `Broadcaster<T>`: named subscriber set that hands every published value
//!   to every client, in registration order.
//! - `ChatMessageBroadcaster`: the chat (and rejected-chat) stream.
//! - `TranscriptionBroadcaster`: live caption lines.
//!
//! Broadcasters keep no history: a client only sees what is published after
//! it subscribed.

pub mod engine;
pub mod message;
pub mod topic;
pub mod transcription;

pub use engine::{Broadcaster, ChatMessageBroadcaster};
pub use message::{ChatMessage, Transcript};
pub use topic::SubscriberSet;
pub use transcription::TranscriptionBroadcaster;

#[cfg(test)]
mod tests;
