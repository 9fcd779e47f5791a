use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use super::settings::Settings;
use super::{load_config, load_config_from};

fn write_config(contents: &str, extension: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("podium.{extension}"));
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.presenter.self_name, "Me");
    assert_eq!(settings.presenter.expected_senders, 200);
    assert_eq!(settings.language_poll.max_votes_per_person, 1);
    assert_eq!(settings.word_cloud.max_words_per_person, 7);
    assert_eq!(settings.word_cloud.min_word_length, 3);
    assert_eq!(settings.word_cloud.max_word_length, 24);
    assert_eq!(settings.delivery.batch_period_ms, 100);
    assert_eq!(settings.log.level, "info");
}

#[test]
fn test_default_language_table() {
    let languages = Settings::default().language_poll.language_by_keyword;
    assert_eq!(languages["rust"], "Rust");
    assert_eq!(languages["golang"], "Go");
    assert_eq!(languages["c++"], "C");
    assert_eq!(languages["f#"], "ML");
    assert!(languages.keys().all(|k| *k == k.to_lowercase()));
}

#[test]
fn test_default_stop_words() {
    let stop_words = Settings::default().word_cloud.stop_words;
    assert!(stop_words.iter().any(|w| w == "the"));
    assert!(stop_words.iter().any(|w| w == "yourselves"));
    assert!(!stop_words.iter().any(|w| w == "rust"));
}

#[test]
#[serial]
fn test_load_config_without_sources_uses_defaults() {
    temp_env::with_vars_unset(["PODIUM_PRESENTER__SELF_NAME", "PODIUM_LOG__LEVEL"], || {
        let settings = load_config().unwrap();
        assert_eq!(settings, Settings::default());
    });
}

#[test]
#[serial]
fn test_load_config_from_partial_file() {
    let (_dir, path) = write_config(
        r#"
[presenter]
self_name = "Presenter"

[word_cloud]
min_word_length = 4
stop_words = ["rust"]
"#,
        "toml",
    );

    let settings = load_config_from(&path).unwrap();
    let default = Settings::default();
    assert_eq!(settings.presenter.self_name, "Presenter");
    assert_eq!(settings.presenter.expected_senders, default.presenter.expected_senders);
    assert_eq!(settings.word_cloud.min_word_length, 4);
    assert_eq!(settings.word_cloud.max_word_length, default.word_cloud.max_word_length);
    assert_eq!(settings.word_cloud.stop_words, ["rust"]);
    assert_eq!(settings.language_poll, default.language_poll);
}

#[test]
#[serial]
fn test_load_config_from_json_language_table() {
    let (_dir, path) = write_config(
        r#"{ "language_poll": { "language_by_keyword": { "zig": "Zig" } } }"#,
        "json",
    );

    let settings = load_config_from(&path).unwrap();
    assert_eq!(settings.language_poll.language_by_keyword.len(), 1);
    assert_eq!(settings.language_poll.language_by_keyword["zig"], "Zig");
    assert_eq!(settings.language_poll.max_votes_per_person, 1);
}

#[test]
#[serial]
fn test_load_config_from_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config_from(dir.path().join("missing.toml")).is_err());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let (_dir, path) = write_config("[delivery]\nbatch_period_ms = 250\n", "toml");

    temp_env::with_vars(
        [
            ("PODIUM_DELIVERY__BATCH_PERIOD_MS", Some("0")),
            ("PODIUM_PRESENTER__SELF_NAME", Some("Host")),
            ("PODIUM_WORD_CLOUD__STOP_WORDS", Some("foo,bar")),
        ],
        || {
            let settings = load_config_from(&path).unwrap();
            assert_eq!(settings.delivery.batch_period_ms, 0);
            assert_eq!(settings.presenter.self_name, "Host");
            assert_eq!(settings.word_cloud.stop_words, ["foo", "bar"]);
        },
    );
}
