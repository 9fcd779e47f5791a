use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use podium::aggregate::{Counts, SendersByTokenCounter};
use podium::broker::{ChatMessage, ChatMessageBroadcaster};
use podium::client::Client;
use podium::config::Settings;
use podium::presentation::Presentation;
use podium::tokenizer::MappedKeywordsTokenizer;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

async fn next<T>(rx: &mut UnboundedReceiver<T>) -> T {
    timeout(WAIT, rx.recv()).await.unwrap().unwrap()
}

fn language_counter(tokens_per_sender: usize) -> (ChatMessageBroadcaster, SendersByTokenCounter) {
    let keywords: HashMap<String, String> = [("go", "Go"), ("rust", "Rust"), ("java", "Java")]
        .into_iter()
        .map(|(raw, token)| (raw.to_string(), token.to_string()))
        .collect();
    let chat = ChatMessageBroadcaster::new("chat");
    let counter = SendersByTokenCounter::new(
        "language-poll",
        Arc::new(MappedKeywordsTokenizer::new(keywords).unwrap()),
        tokens_per_sender,
        "Me",
        chat.clone(),
        ChatMessageBroadcaster::new("rejected"),
    )
    .unwrap();
    (chat, counter)
}

fn counts(groups: &[(u64, &[&str])]) -> Vec<(u64, Vec<String>)> {
    groups
        .iter()
        .map(|(count, tokens)| (*count, tokens.iter().map(|t| t.to_string()).collect()))
        .collect()
}

#[tokio::test]
async fn a_sender_over_their_limit_moves_their_vote() {
    let (chat, counter) = language_counter(2);
    let (client, mut rx) = Client::channel();
    counter.subscribe(client);
    next(&mut rx).await;

    for text in ["go", "go", "rust", "java"] {
        chat.new_message(ChatMessage::new("alice", "Everyone", text));
    }

    let mut latest = Counts::default();
    for _ in 0..4 {
        latest = next(&mut rx).await;
    }
    assert_eq!(latest.tokens_and_counts, counts(&[(1, &["Rust", "Java"])]));
}

#[tokio::test]
async fn votes_from_different_senders_add_up() {
    let (chat, counter) = language_counter(1);
    let (client, mut rx) = Client::channel();
    counter.subscribe(client);
    next(&mut rx).await;

    chat.new_message(ChatMessage::new("alice", "Everyone", "go"));
    chat.new_message(ChatMessage::new("bob", "Everyone", "go"));

    next(&mut rx).await;
    assert_eq!(next(&mut rx).await.tokens_and_counts, counts(&[(2, &["Go"])]));
}

#[tokio::test]
async fn a_late_subscriber_starts_from_the_current_state() {
    let (chat, counter) = language_counter(1);
    let (early, mut early_rx) = Client::channel();
    counter.subscribe(early);
    next(&mut early_rx).await;

    chat.new_message(ChatMessage::new("alice", "Everyone", "rust"));
    let current = next(&mut early_rx).await;

    let (late, mut late_rx) = Client::channel();
    counter.subscribe(late);
    assert_eq!(next(&mut late_rx).await, current);
    assert_eq!(current.tokens_and_counts, counts(&[(1, &["Rust"])]));
}

#[tokio::test]
async fn a_full_presentation_session() {
    let mut settings = Settings::default();
    settings.presenter.self_name = "Host".to_string();
    settings.language_poll.language_by_keyword =
        BTreeMap::from([("rust".to_string(), "Rust".to_string())]);
    let presentation = Presentation::from_settings(&settings).unwrap();

    let (poll, mut poll_rx) = Client::channel();
    let (moderated, mut moderated_rx) = Client::channel();
    let (moderator, mut rejected_rx) = Client::channel();
    presentation.language_poll().subscribe(poll);
    presentation.moderated().subscribe(moderated);
    presentation.rejected_messages().subscribe(moderator);
    next(&mut poll_rx).await;
    next(&mut moderated_rx).await;

    presentation
        .submit_chat_route("Alice to Everyone", "rust please")
        .unwrap();
    presentation
        .submit_chat_route(" to Everyone", "an anonymous rust question")
        .unwrap();

    // Alice's vote is counted, and the moderated collector passes it on.
    assert_eq!(next(&mut poll_rx).await.count_of("Rust"), 1);
    assert_eq!(next(&mut rejected_rx).await.sender, "Alice");

    assert_eq!(next(&mut poll_rx).await.count_of("Rust"), 2);
    assert_eq!(
        next(&mut moderated_rx).await.chat_text,
        ["an anonymous rust question"]
    );

    presentation.reset_all();
    assert_eq!(next(&mut poll_rx).await, Counts::default());
    assert!(next(&mut moderated_rx).await.chat_text.is_empty());
}
