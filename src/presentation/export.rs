//! Saved chat logs.
//!
//! Each non-blank line is either `"[HH:MM:SS] From <route>: <text>"` or
//! `"<route>: <text>"`. `Replay` runs such a log through fresh language poll
//! and word cloud counters, synchronously and without subscribers.

use std::sync::Arc;

use chrono::NaiveTime;
use serde::Serialize;
use tracing::debug;

use super::route::ChatRoute;
use super::{language_tokenizer, word_tokenizer};
use crate::aggregate::{AggregateState, Counts, TokenCounts};
use crate::broker::ChatMessage;
use crate::config::Settings;
use crate::utils::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLine {
    pub time: Option<NaiveTime>,
    pub route: String,
    pub text: String,
}

impl ExportLine {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (time, rest) = match line.strip_prefix('[') {
            Some(stamped) => {
                let (stamp, rest) = stamped
                    .split_once(']')
                    .ok_or_else(|| malformed(line, "unterminated timestamp"))?;
                let time = NaiveTime::parse_from_str(stamp.trim(), "%H:%M:%S")
                    .map_err(|e| malformed(line, &e.to_string()))?;
                let rest = rest.trim_start();
                (Some(time), rest.strip_prefix("From ").unwrap_or(rest))
            }
            None => (None, line),
        };

        let (route, text) = rest
            .split_once(": ")
            .or_else(|| rest.strip_suffix(':').map(|route| (route, "")))
            .ok_or_else(|| malformed(line, "missing \": \" after route"))?;
        if route.trim().is_empty() {
            return Err(malformed(line, "empty route"));
        }

        Ok(Self {
            time,
            route: route.trim_end().to_string(),
            text: text.to_string(),
        })
    }
}

fn malformed(line: &str, reason: &str) -> Error {
    Error::BadRequest(format!("malformed export line {line:?}: {reason}"))
}

/// Parses every non-blank line of `contents`. The error names the first bad
/// line by number.
pub fn parse_export(contents: &str) -> Result<Vec<ExportLine>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            ExportLine::parse(line).map_err(|e| match e {
                Error::BadRequest(reason) => Error::BadRequest(format!("line {}: {reason}", index + 1)),
                other => other,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub messages: usize,
    pub ignored: usize,
    pub language_poll: Counts,
    pub word_cloud: Counts,
}

pub struct Replay {
    self_name: String,
    messages: usize,
    ignored: usize,
    language_poll: TokenCounts,
    word_cloud: TokenCounts,
}

impl Replay {
    pub fn new(settings: &Settings) -> Result<Self> {
        let presenter = &settings.presenter;
        let language_poll = TokenCounts::new(
            Arc::new(language_tokenizer(&settings.language_poll)?),
            settings.language_poll.max_votes_per_person,
            &presenter.self_name,
            presenter.expected_senders,
        )
        .map_err(|e| e.into_initialization("language poll"))?;
        let word_cloud = TokenCounts::new(
            Arc::new(word_tokenizer(&settings.word_cloud)?),
            settings.word_cloud.max_words_per_person,
            &presenter.self_name,
            presenter.expected_senders,
        )
        .map_err(|e| e.into_initialization("word cloud"))?;

        Ok(Self {
            self_name: presenter.self_name.clone(),
            messages: 0,
            ignored: 0,
            language_poll,
            word_cloud,
        })
    }

    pub fn feed(&mut self, line: &ExportLine) -> Result<()> {
        let Some(route) = ChatRoute::parse(&line.route, &self.self_name)? else {
            debug!("Skipping outgoing direct message {:?}", line.route);
            self.ignored += 1;
            return Ok(());
        };

        let msg = ChatMessage::new(route.sender, route.recipient, line.text.as_str());
        self.language_poll.receive(&msg);
        self.word_cloud.receive(&msg);
        self.messages += 1;
        Ok(())
    }

    pub fn feed_all<'a>(&mut self, lines: impl IntoIterator<Item = &'a ExportLine>) -> Result<()> {
        lines.into_iter().try_for_each(|line| self.feed(line))
    }

    pub fn finish(self) -> ReplaySummary {
        ReplaySummary {
            messages: self.messages,
            ignored: self.ignored,
            language_poll: self.language_poll.snapshot(),
            word_cloud: self.word_cloud.snapshot(),
        }
    }
}
