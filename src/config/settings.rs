use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Everything the presentation needs to wire its topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub presenter: PresenterSettings,
    pub language_poll: LanguagePollSettings,
    pub word_cloud: WordCloudSettings,
    pub delivery: DeliverySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenterSettings {
    /// Name the presenter appears under in the chat.
    pub self_name: String,
    /// Sizing hint for per-sender tables.
    pub expected_senders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePollSettings {
    pub max_votes_per_person: usize,
    /// Lowercase keyword to the language it counts towards.
    pub language_by_keyword: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCloudSettings {
    pub max_words_per_person: usize,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub stop_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySettings {
    /// How long subscriber updates are held back so bursts collapse into
    /// one. Zero forwards every update as it comes.
    pub batch_period_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

/// Settings as read from files and the environment, before defaults are
/// filled in.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub presenter: Option<PartialPresenterSettings>,
    pub language_poll: Option<PartialLanguagePollSettings>,
    pub word_cloud: Option<PartialWordCloudSettings>,
    pub delivery: Option<PartialDeliverySettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialPresenterSettings {
    pub self_name: Option<String>,
    pub expected_senders: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLanguagePollSettings {
    pub max_votes_per_person: Option<usize>,
    pub language_by_keyword: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
pub struct PartialWordCloudSettings {
    pub max_words_per_person: Option<usize>,
    pub min_word_length: Option<usize>,
    pub max_word_length: Option<usize>,
    pub stop_words: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct PartialDeliverySettings {
    pub batch_period_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

const DEFAULT_LANGUAGE_BY_KEYWORD: &[(&str, &str)] = &[
    ("c", "C"),
    ("c++", "C"),
    ("c#", "C#"),
    ("csharp", "C#"),
    ("go", "Go"),
    ("golang", "Go"),
    ("java", "Java"),
    ("js", "JavaScript"),
    ("ecmascript", "JavaScript"),
    ("javascript", "JavaScript"),
    ("kotlin", "Kotlin"),
    ("kt", "Kotlin"),
    ("lisp", "Lisp"),
    ("clojure", "Lisp"),
    ("racket", "Lisp"),
    ("scheme", "Lisp"),
    ("ml", "ML"),
    ("haskell", "ML"),
    ("caml", "ML"),
    ("elm", "ML"),
    ("f#", "ML"),
    ("ocaml", "ML"),
    ("purescript", "ML"),
    ("perl", "Perl"),
    ("php", "PHP"),
    ("py", "Python"),
    ("python", "Python"),
    ("ruby", "Ruby"),
    ("rb", "Ruby"),
    ("rust", "Rust"),
    ("scala", "Scala"),
    ("swift", "Swift"),
    ("ts", "TypeScript"),
    ("typescript", "TypeScript"),
];

const DEFAULT_STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "and", "any", "are", "because",
    "been", "before", "being", "below", "between", "both", "but", "can", "did", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has",
    "have", "having", "her", "here", "hers", "herself", "him", "himself", "his", "how",
    "into", "its", "itself", "just", "me", "more", "most", "myself", "nor", "not", "now",
    "off", "once", "only", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "should", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "too", "under", "until", "very", "was", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "you", "your", "yours", "yourself",
    "yourselves",
];

impl Default for Settings {
    fn default() -> Self {
        Self {
            presenter: PresenterSettings {
                self_name: "Me".to_string(),
                expected_senders: 200,
            },
            language_poll: LanguagePollSettings {
                max_votes_per_person: 1,
                language_by_keyword: DEFAULT_LANGUAGE_BY_KEYWORD
                    .iter()
                    .map(|(keyword, language)| (keyword.to_string(), language.to_string()))
                    .collect(),
            },
            word_cloud: WordCloudSettings {
                max_words_per_person: 7,
                min_word_length: 3,
                max_word_length: 24,
                stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            },
            delivery: DeliverySettings {
                batch_period_ms: 100,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}
