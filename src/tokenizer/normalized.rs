use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Tokenize;
use crate::utils::error::{Error, Result};

/// One or more letter runs joined by single hyphens.
static WORD_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{L}+(?:-\p{L}+)*$").expect("word shape pattern compiles"));

fn is_word_shaped(word: &str) -> bool {
    WORD_SHAPE.is_match(word)
}

/// Extracts lowercase words for a word cloud, skipping stop words and words
/// outside `[min_word_length, max_word_length]` (measured in characters).
#[derive(Debug, Clone)]
pub struct NormalizedWordsTokenizer {
    stop_words: HashSet<String>,
    min_word_length: usize,
    max_word_length: usize,
}

impl Default for NormalizedWordsTokenizer {
    fn default() -> Self {
        Self {
            stop_words: HashSet::new(),
            min_word_length: 1,
            max_word_length: usize::MAX,
        }
    }
}

impl NormalizedWordsTokenizer {
    pub fn new<I, S>(stop_words: I, min_word_length: usize, max_word_length: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if min_word_length < 1 {
            return Err(Error::InvalidArgument(format!(
                "min_word_length {min_word_length} must be at least 1"
            )));
        }
        if max_word_length < min_word_length {
            return Err(Error::InvalidArgument(format!(
                "max_word_length {max_word_length} must be no less than min_word_length {min_word_length}"
            )));
        }

        let stop_words: HashSet<String> = stop_words.into_iter().map(Into::into).collect();
        let mut invalid: Vec<&str> = stop_words
            .iter()
            .map(String::as_str)
            .filter(|word| !is_word_shaped(word))
            .collect();
        if !invalid.is_empty() {
            invalid.sort_unstable();
            return Err(Error::InvalidArgument(format!(
                "some stop words are invalid: {{{}}}",
                invalid.join(",")
            )));
        }

        Ok(Self {
            stop_words: stop_words.iter().map(|word| word.to_lowercase()).collect(),
            min_word_length,
            max_word_length,
        })
    }

    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl Tokenize for NormalizedWordsTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphabetic() || c == '-'))
            .map(|piece| piece.to_lowercase().trim_matches('-').to_string())
            .filter(|word| {
                let length = word.chars().count();
                (self.min_word_length..=self.max_word_length).contains(&length)
                    && !self.stop_words.contains(word)
                    && is_word_shaped(word)
            })
            .collect()
    }
}
