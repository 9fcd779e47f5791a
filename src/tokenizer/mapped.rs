use std::collections::HashMap;

use tracing::debug;

use super::Tokenize;
use crate::utils::error::{Error, Result};

/// Characters, besides whitespace, that separate words in chat text.
const PUNCTUATION_SEPARATORS: &[char] = &['!', '"', '&', ',', '.', '/', '?', '|'];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || PUNCTUATION_SEPARATORS.contains(&c)
}

/// Maps known keywords (case-insensitively) to canonical tokens and drops
/// every other word, e.g. `golang` and `go` both become `Go`.
#[derive(Debug, Clone)]
pub struct MappedKeywordsTokenizer {
    keywords_by_raw_token: HashMap<String, String>,
}

impl MappedKeywordsTokenizer {
    pub fn new(keywords_by_raw_token: HashMap<String, String>) -> Result<Self> {
        if keywords_by_raw_token.is_empty() {
            return Err(Error::InvalidArgument(
                "keywords_by_raw_token must not be empty".to_string(),
            ));
        }

        let mut invalid: Vec<&str> = keywords_by_raw_token
            .keys()
            .map(String::as_str)
            .filter(|raw| raw.is_empty() || raw.contains(is_separator))
            .collect();
        if !invalid.is_empty() {
            invalid.sort_unstable();
            return Err(Error::InvalidArgument(format!(
                "some keyword mappings have invalid raw tokens: {{{}}}",
                invalid.join(",")
            )));
        }

        let mut lowercased: HashMap<String, String> =
            HashMap::with_capacity(keywords_by_raw_token.len());
        let mut duplicates: Vec<String> = Vec::new();
        for (raw, keyword) in keywords_by_raw_token {
            let raw = raw.to_lowercase();
            if lowercased.contains_key(&raw) {
                duplicates.push(raw);
            } else {
                lowercased.insert(raw, keyword);
            }
        }
        if !duplicates.is_empty() {
            duplicates.sort_unstable();
            return Err(Error::InvalidArgument(format!(
                "some raw tokens differ only by case: {{{}}}",
                duplicates.join(",")
            )));
        }

        debug!("mapped keywords tokenizer with {} raw tokens", lowercased.len());
        Ok(Self {
            keywords_by_raw_token: lowercased,
        })
    }

    pub fn keywords(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keywords_by_raw_token
            .iter()
            .map(|(raw, keyword)| (raw.as_str(), keyword.as_str()))
    }
}

impl Tokenize for MappedKeywordsTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(is_separator)
            .filter(|word| !word.is_empty())
            .filter_map(|word| self.keywords_by_raw_token.get(&word.to_lowercase()))
            .cloned()
            .collect()
    }
}
