//! Tokenizers turn raw chat text into the tokens counted by a
//! `SendersByTokenCounter`.
//!
//! Token order matters: the counter treats earlier tokens as more important,
//! so tokenizers return tokens in the order they appear in the text.

pub mod mapped;
pub mod normalized;

pub use mapped::MappedKeywordsTokenizer;
pub use normalized::NormalizedWordsTokenizer;

/// Extracts zero or more tokens from a piece of text.
pub trait Tokenize: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<F> Tokenize for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}
