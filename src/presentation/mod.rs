//! The presentation hub: one chat stream feeding every audience-facing topic.
//!
//! ```text
//! chat ──┬─> language-poll (counts)
//!        ├─> word-cloud    (counts)
//!        ├─> question      (presenter approved text)
//!        └─> moderated     (anonymous text)
//!            └─ anything a topic does not take ─> rejected
//! transcription (live captions, separate stream)
//! ```

pub mod export;
pub mod route;

pub use export::{ExportLine, Replay, ReplaySummary, parse_export};
pub use route::{ChatRoute, EVERYONE};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::aggregate::{MessageApprovalRouter, ModeratedTextCollector, SendersByTokenCounter};
use crate::broker::{ChatMessage, ChatMessageBroadcaster, TranscriptionBroadcaster};
use crate::client::{Client, coalescing};
use crate::config::{LanguagePollSettings, Settings, WordCloudSettings};
use crate::tokenizer::{MappedKeywordsTokenizer, NormalizedWordsTokenizer};
use crate::utils::error::Result;

/// Builds the language poll tokenizer; failures are `Initialization` errors.
pub fn language_tokenizer(settings: &LanguagePollSettings) -> Result<MappedKeywordsTokenizer> {
    let keywords: HashMap<String, String> = settings
        .language_by_keyword
        .iter()
        .map(|(keyword, language)| (keyword.clone(), language.clone()))
        .collect();
    MappedKeywordsTokenizer::new(keywords).map_err(|e| e.into_initialization("language poll"))
}

/// Builds the word cloud tokenizer; failures are `Initialization` errors.
pub fn word_tokenizer(settings: &WordCloudSettings) -> Result<NormalizedWordsTokenizer> {
    NormalizedWordsTokenizer::new(
        settings.stop_words.iter().cloned(),
        settings.min_word_length,
        settings.max_word_length,
    )
    .map_err(|e| e.into_initialization("word cloud"))
}

#[derive(Debug, Clone)]
pub struct Presentation {
    self_name: String,
    batch_period: Duration,
    chat_messages: ChatMessageBroadcaster,
    rejected_messages: ChatMessageBroadcaster,
    language_poll: SendersByTokenCounter,
    word_cloud: SendersByTokenCounter,
    questions: MessageApprovalRouter,
    moderated: ModeratedTextCollector,
    transcriptions: TranscriptionBroadcaster,
}

impl Presentation {
    /// Wires every topic from `settings`. Must run inside a Tokio runtime.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let self_name = settings.presenter.self_name.as_str();
        let expected_senders = settings.presenter.expected_senders;
        let chat_messages = ChatMessageBroadcaster::new("chat");
        let rejected_messages = ChatMessageBroadcaster::new("rejected");

        let language_poll = SendersByTokenCounter::with_expected_senders(
            "language-poll",
            Arc::new(language_tokenizer(&settings.language_poll)?),
            settings.language_poll.max_votes_per_person,
            self_name,
            expected_senders,
            chat_messages.clone(),
            rejected_messages.clone(),
        )
        .map_err(|e| e.into_initialization("language poll"))?;

        let word_cloud = SendersByTokenCounter::with_expected_senders(
            "word-cloud",
            Arc::new(word_tokenizer(&settings.word_cloud)?),
            settings.word_cloud.max_words_per_person,
            self_name,
            expected_senders,
            chat_messages.clone(),
            rejected_messages.clone(),
        )
        .map_err(|e| e.into_initialization("word cloud"))?;

        let questions = MessageApprovalRouter::approval_router(
            "question",
            self_name,
            chat_messages.clone(),
            rejected_messages.clone(),
        )
        .map_err(|e| e.into_initialization("questions"))?;

        let moderated = ModeratedTextCollector::moderated_text_collector(
            "moderated",
            chat_messages.clone(),
            rejected_messages.clone(),
        )
        .map_err(|e| e.into_initialization("moderated text"))?;

        info!("Presentation ready (presenter: {self_name})");
        Ok(Self {
            self_name: self_name.to_string(),
            batch_period: Duration::from_millis(settings.delivery.batch_period_ms),
            chat_messages,
            rejected_messages,
            language_poll,
            word_cloud,
            questions,
            moderated,
            transcriptions: TranscriptionBroadcaster::new(),
        })
    }

    pub fn submit_chat_message(
        &self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.chat_messages
            .new_message(ChatMessage::new(sender, recipient, text));
    }

    /// Submits `text` sent along a chat routing string. Malformed routes are
    /// a `BadRequest`; the presenter's own direct messages are dropped.
    pub fn submit_chat_route(&self, route: &str, text: impl Into<String>) -> Result<()> {
        if let Some(route) = ChatRoute::parse(route, &self.self_name)? {
            self.submit_chat_message(route.sender, route.recipient, text);
        }
        Ok(())
    }

    pub fn submit_transcription_text(&self, text: impl Into<String>) {
        self.transcriptions.new_transcription_text(text);
    }

    pub fn reset_all(&self) {
        self.language_poll.reset();
        self.word_cloud.reset();
        self.questions.reset();
        self.moderated.reset();
    }

    /// A client forwarding at most one snapshot per batch period to
    /// `downstream`.
    pub fn batched<T>(&self, downstream: UnboundedSender<T>) -> Result<Client<T>>
    where
        T: Send + 'static,
    {
        coalescing(self.batch_period, downstream)
    }

    pub fn self_name(&self) -> &str {
        &self.self_name
    }

    pub fn batch_period(&self) -> Duration {
        self.batch_period
    }

    pub fn chat_messages(&self) -> &ChatMessageBroadcaster {
        &self.chat_messages
    }

    pub fn rejected_messages(&self) -> &ChatMessageBroadcaster {
        &self.rejected_messages
    }

    pub fn language_poll(&self) -> &SendersByTokenCounter {
        &self.language_poll
    }

    pub fn word_cloud(&self) -> &SendersByTokenCounter {
        &self.word_cloud
    }

    pub fn questions(&self) -> &MessageApprovalRouter {
        &self.questions
    }

    pub fn moderated(&self) -> &ModeratedTextCollector {
        &self.moderated
    }

    pub fn transcriptions(&self) -> &TranscriptionBroadcaster {
        &self.transcriptions
    }
}
