//! Message definitions for the broadcasters
//!
//! Field names on the wire are kept short (`s`, `r`, `t`) since chat
//! messages are pushed to every moderator screen.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "s")]
    pub sender: String,
    #[serde(rename = "r")]
    pub recipient: String,
    #[serde(rename = "t")]
    pub text: String,
}

impl ChatMessage {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            text: text.into(),
        }
    }

    /// Messages relayed from the moderation tool carry no sender.
    pub fn is_anonymous(&self) -> bool {
        self.sender.is_empty()
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}: {}", self.sender, self.recipient, self.text)
    }
}

/// One line of live transcription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(rename = "transcriptionText")]
    pub text: String,
}
