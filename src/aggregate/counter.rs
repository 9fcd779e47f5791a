//! Per-sender token counting for polls and word clouds.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AggregateState, Aggregator, Disposition};
use crate::broker::{ChatMessage, ChatMessageBroadcaster};
use crate::collections::{BoundedOrderedSet, Effect, FrequencyIndex};
use crate::tokenizer::Tokenize;
use crate::utils::error::{Error, Result};

/// An accepted chat message together with the tokens it contributed, most
/// important last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageAndTokens {
    pub chat_message: ChatMessage,
    pub tokens: Vec<String>,
}

/// Snapshot published by a `SendersByTokenCounter`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    pub chat_messages_and_tokens: Vec<ChatMessageAndTokens>,
    /// Tokens each named sender currently contributes, least to most recent.
    pub tokens_by_sender: BTreeMap<String, Vec<String>>,
    /// Count groups, highest count first. Within a group, tokens that
    /// reached the count earlier come first.
    pub tokens_and_counts: Vec<(u64, Vec<String>)>,
}

impl Counts {
    pub fn count_of(&self, token: &str) -> u64 {
        self.tokens_and_counts
            .iter()
            .find(|(_, tokens)| tokens.iter().any(|t| t == token))
            .map_or(0, |(count, _)| *count)
    }

    pub fn tokens_for(&self, sender: &str) -> &[String] {
        self.tokens_by_sender
            .get(sender)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens_and_counts.is_empty() && self.chat_messages_and_tokens.is_empty()
    }
}

/// Counting state behind a `SendersByTokenCounter`.
///
/// A named sender contributes at most `tokens_per_sender` tokens: once their
/// bounded set is full, each new token evicts the one they touched least
/// recently and moves one vote across in the frequency index. Anonymous
/// messages cannot be attributed to anyone, so every token they carry is
/// counted.
pub struct TokenCounts {
    tokenizer: Arc<dyn Tokenize>,
    self_sender: String,
    empty_token_set: BoundedOrderedSet<String>,
    expected_senders: usize,
    chat_messages_and_tokens: Vec<ChatMessageAndTokens>,
    tokens_by_sender: HashMap<String, BoundedOrderedSet<String>>,
    token_counts: FrequencyIndex<String>,
}

impl TokenCounts {
    pub fn new(
        tokenizer: Arc<dyn Tokenize>,
        tokens_per_sender: usize,
        self_sender: &str,
        expected_senders: usize,
    ) -> Result<Self> {
        if self_sender.is_empty() {
            return Err(Error::InvalidArgument(
                "presenter name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            tokenizer,
            self_sender: self_sender.to_string(),
            empty_token_set: BoundedOrderedSet::new(tokens_per_sender)?,
            expected_senders,
            chat_messages_and_tokens: Vec::new(),
            tokens_by_sender: HashMap::with_capacity(expected_senders),
            token_counts: FrequencyIndex::new(),
        })
    }

    pub fn tokens_per_sender(&self) -> usize {
        self.empty_token_set.capacity()
    }
}

impl AggregateState for TokenCounts {
    type Snapshot = Counts;

    fn receive(&mut self, msg: &ChatMessage) -> Disposition {
        if msg.sender == self.self_sender {
            return Disposition::Rejected;
        }

        let extracted = self.tokenizer.tokenize(&msg.text);
        if extracted.is_empty() {
            debug!("No tokens in message from {:?}", msg.sender);
            return Disposition::Rejected;
        }
        debug!("Extracted tokens {extracted:?}");

        // Fed last-to-first so the earliest token ends up most recently
        // touched and is the last to be evicted.
        let prioritized: Vec<String> = extracted.into_iter().rev().collect();

        if msg.is_anonymous() {
            for token in &prioritized {
                self.token_counts.increment(token.clone());
            }
        } else {
            let tokens = self
                .tokens_by_sender
                .entry(msg.sender.clone())
                .or_insert_with(|| self.empty_token_set.clone());
            for token in &prioritized {
                match tokens.append(token.clone()) {
                    Effect::Appended(token) => self.token_counts.increment(token),
                    Effect::AppendedEvicting { appended, evicted } => {
                        self.token_counts.update(appended, Some(evicted))
                    }
                    Effect::NoOp => {}
                }
            }
        }

        self.chat_messages_and_tokens.push(ChatMessageAndTokens {
            chat_message: msg.clone(),
            tokens: prioritized,
        });
        Disposition::Accepted
    }

    fn snapshot(&self) -> Counts {
        Counts {
            chat_messages_and_tokens: self.chat_messages_and_tokens.clone(),
            tokens_by_sender: self
                .tokens_by_sender
                .iter()
                .map(|(sender, tokens)| (sender.clone(), tokens.iter().cloned().collect()))
                .collect(),
            tokens_and_counts: self.token_counts.descending(),
        }
    }

    fn clear(&mut self) {
        self.chat_messages_and_tokens.clear();
        self.tokens_by_sender = HashMap::with_capacity(self.expected_senders);
        self.token_counts.clear();
    }
}

/// Counts tokens across senders, capping each sender's contribution.
pub type SendersByTokenCounter = Aggregator<TokenCounts>;

impl Aggregator<TokenCounts> {
    /// Counter fed by `chat_messages`. Messages from `self_sender`, and
    /// messages without any token, go to `rejected_messages` instead.
    pub fn new(
        name: &str,
        tokenizer: Arc<dyn Tokenize>,
        tokens_per_sender: usize,
        self_sender: &str,
        chat_messages: ChatMessageBroadcaster,
        rejected_messages: ChatMessageBroadcaster,
    ) -> Result<Self> {
        Self::with_expected_senders(
            name,
            tokenizer,
            tokens_per_sender,
            self_sender,
            0,
            chat_messages,
            rejected_messages,
        )
    }

    /// Like `new`, pre-sizing the per-sender table for `expected_senders`.
    pub fn with_expected_senders(
        name: &str,
        tokenizer: Arc<dyn Tokenize>,
        tokens_per_sender: usize,
        self_sender: &str,
        expected_senders: usize,
        chat_messages: ChatMessageBroadcaster,
        rejected_messages: ChatMessageBroadcaster,
    ) -> Result<Self> {
        let state = TokenCounts::new(tokenizer, tokens_per_sender, self_sender, expected_senders)?;
        Self::spawn(name, state, chat_messages, rejected_messages)
    }
}
