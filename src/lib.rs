//! # Podium
//!
//! `podium` is the in-memory broadcast and aggregation core of a live
//! presentation: audience chat and live transcription come in, and polls,
//! word clouds, approved questions and captions go out to whatever screens
//! are subscribed.
//!
//! ## Core Modules
//!
//! - `broker`: named broadcasters for raw chat and transcription events.
//! - `aggregate`: topics that derive state from the chat stream and push
//!   snapshots of it (token counters and text collectors).
//! - `collections`: the bounded ordered set and frequency index behind the
//!   counters.
//! - `tokenizer`: keyword and word extraction from chat text.
//! - `client`: subscriber handles and snapshot coalescing.
//! - `presentation`: wiring of all topics, chat routing and chat exports.
//! - `config`: settings loaded from files and the environment.
//! - `utils`: the crate error type, logging and locking helpers.

pub mod aggregate;
pub mod broker;
pub mod client;
pub mod collections;
pub mod config;
pub mod presentation;
pub mod tokenizer;
pub mod utils;
