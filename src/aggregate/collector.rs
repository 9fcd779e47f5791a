//! Transcripts of chat text picked out by sender.
//!
//! The approval router keeps what the presenter sends (approved audience
//! questions); the moderated collector keeps anonymous messages coming out
//! of the moderation queue. Anything else is forwarded as rejected.

use serde::{Deserialize, Serialize};

use super::{AggregateState, Aggregator, Disposition};
use crate::broker::{ChatMessage, ChatMessageBroadcaster};
use crate::utils::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SenderFilter {
    /// Messages sent by exactly this sender.
    From(String),
    /// Messages with an empty sender.
    Anonymous,
}

impl SenderFilter {
    pub fn accepts(&self, msg: &ChatMessage) -> bool {
        match self {
            SenderFilter::From(sender) => msg.sender == *sender,
            SenderFilter::Anonymous => msg.is_anonymous(),
        }
    }
}

/// Snapshot of a transcript, newest entry first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Messages {
    pub chat_text: Vec<String>,
}

#[derive(Debug)]
pub struct TextCollector {
    filter: SenderFilter,
    chat_text: Vec<String>,
}

impl TextCollector {
    pub fn new(filter: SenderFilter) -> Result<Self> {
        if let SenderFilter::From(sender) = &filter {
            if sender.is_empty() {
                return Err(Error::InvalidArgument(
                    "sender filter must name a sender".to_string(),
                ));
            }
        }

        Ok(Self {
            filter,
            chat_text: Vec::new(),
        })
    }

    pub fn filter(&self) -> &SenderFilter {
        &self.filter
    }
}

impl AggregateState for TextCollector {
    type Snapshot = Messages;

    fn receive(&mut self, msg: &ChatMessage) -> Disposition {
        if !self.filter.accepts(msg) {
            return Disposition::Rejected;
        }
        self.chat_text.push(msg.text.clone());
        Disposition::Accepted
    }

    fn snapshot(&self) -> Messages {
        Messages {
            chat_text: self.chat_text.iter().rev().cloned().collect(),
        }
    }

    fn clear(&mut self) {
        self.chat_text.clear();
    }
}

/// Collects the messages the presenter approved.
pub type MessageApprovalRouter = Aggregator<TextCollector>;

/// Collects anonymous messages released by moderation.
pub type ModeratedTextCollector = Aggregator<TextCollector>;

impl Aggregator<TextCollector> {
    pub fn approval_router(
        name: &str,
        self_sender: &str,
        chat_messages: ChatMessageBroadcaster,
        rejected_messages: ChatMessageBroadcaster,
    ) -> Result<MessageApprovalRouter> {
        let state = TextCollector::new(SenderFilter::From(self_sender.to_string()))?;
        Self::spawn(name, state, chat_messages, rejected_messages)
    }

    pub fn moderated_text_collector(
        name: &str,
        chat_messages: ChatMessageBroadcaster,
        rejected_messages: ChatMessageBroadcaster,
    ) -> Result<ModeratedTextCollector> {
        let state = TextCollector::new(SenderFilter::Anonymous)?;
        Self::spawn(name, state, chat_messages, rejected_messages)
    }
}
