mod settings;

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};

use settings::PartialSettings;

pub use settings::{
    DeliverySettings, LanguagePollSettings, LogSettings, PresenterSettings, Settings,
    WordCloudSettings,
};

/// Prefix of environment variables overriding file settings, e.g.
/// `PODIUM_WORD_CLOUD__MIN_WORD_LENGTH=4`.
pub const ENV_PREFIX: &str = "PODIUM";

/// Loads the configuration from the optional `config/default` file and
/// environment variables, filling anything missing from `Settings::default()`.
pub fn load_config() -> Result<Settings, ConfigError> {
    load(Config::builder().add_source(File::with_name("config/default").required(false)))
}

/// Like `load_config`, reading the file at `path` instead. The file must exist.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    load(Config::builder().add_source(File::from(path.as_ref()).required(true)))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("word_cloud.stop_words")
        .try_parsing(true)
}

fn load(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let config = builder.add_source(environment()).build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(merge(partial, Settings::default()))
}

fn merge(partial: PartialSettings, default: Settings) -> Settings {
    let presenter = partial.presenter;
    let language_poll = partial.language_poll;
    let word_cloud = partial.word_cloud;

    Settings {
        presenter: PresenterSettings {
            self_name: presenter
                .as_ref()
                .and_then(|p| p.self_name.clone())
                .unwrap_or(default.presenter.self_name),
            expected_senders: presenter
                .as_ref()
                .and_then(|p| p.expected_senders)
                .unwrap_or(default.presenter.expected_senders),
        },
        language_poll: LanguagePollSettings {
            max_votes_per_person: language_poll
                .as_ref()
                .and_then(|l| l.max_votes_per_person)
                .unwrap_or(default.language_poll.max_votes_per_person),
            language_by_keyword: language_poll
                .and_then(|l| l.language_by_keyword)
                .unwrap_or(default.language_poll.language_by_keyword),
        },
        word_cloud: WordCloudSettings {
            max_words_per_person: word_cloud
                .as_ref()
                .and_then(|w| w.max_words_per_person)
                .unwrap_or(default.word_cloud.max_words_per_person),
            min_word_length: word_cloud
                .as_ref()
                .and_then(|w| w.min_word_length)
                .unwrap_or(default.word_cloud.min_word_length),
            max_word_length: word_cloud
                .as_ref()
                .and_then(|w| w.max_word_length)
                .unwrap_or(default.word_cloud.max_word_length),
            stop_words: word_cloud
                .and_then(|w| w.stop_words)
                .unwrap_or(default.word_cloud.stop_words),
        },
        delivery: DeliverySettings {
            batch_period_ms: partial
                .delivery
                .and_then(|d| d.batch_period_ms)
                .unwrap_or(default.delivery.batch_period_ms),
        },
        log: LogSettings {
            level: partial
                .log
                .and_then(|l| l.level)
                .unwrap_or(default.log.level),
        },
    }
}

#[cfg(test)]
mod tests;
