use tokio::sync::mpsc;

use super::topic::SubscriberSet;
use super::{ChatMessage, ChatMessageBroadcaster, Transcript, TranscriptionBroadcaster};
use crate::client::Client;

fn chat(sender: &str, text: &str) -> ChatMessage {
    ChatMessage::new(sender, "Everyone", text)
}

#[test]
fn test_subscriber_set_new() {
    let set = SubscriberSet::<ChatMessage>::new();
    assert!(set.is_empty());
}

#[test]
fn test_subscriber_set_subscribe_is_idempotent() {
    let mut set = SubscriberSet::new();
    let (client, _rx) = Client::<ChatMessage>::channel();

    assert!(set.subscribe(client.clone()));
    assert!(!set.subscribe(client.clone()));
    assert_eq!(set.len(), 1);
    assert!(set.contains(&client.id));
}

#[test]
fn test_subscriber_set_unsubscribe() {
    let mut set = SubscriberSet::new();
    let (client, _rx) = Client::<ChatMessage>::channel();
    set.subscribe(client.clone());

    assert!(set.unsubscribe(&client.id));
    assert!(!set.unsubscribe(&client.id));
    assert!(set.is_empty());
}

#[test]
fn test_subscriber_set_deliver_drops_closed_clients() {
    let mut set = SubscriberSet::new();
    let (open, mut open_rx) = Client::<u32>::channel();
    let (closed, closed_rx) = Client::<u32>::channel();
    set.subscribe(open.clone());
    set.subscribe(closed.clone());
    drop(closed_rx);

    assert_eq!(set.deliver(&7), 1);
    assert_eq!(open_rx.try_recv().unwrap(), 7);
    assert!(set.contains(&open.id));
    assert!(!set.contains(&closed.id));
}

#[test]
fn test_chat_message_serializes_with_short_keys() {
    let json = serde_json::to_value(chat("alice", "hi")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "s": "alice", "r": "Everyone", "t": "hi" })
    );
}

#[test]
fn test_chat_message_display() {
    assert_eq!(chat("alice", "hi").to_string(), "alice to Everyone: hi");
    assert!(chat("", "hi").is_anonymous());
}

#[test]
fn test_broadcaster_publish_reaches_every_subscriber() {
    let broadcaster = ChatMessageBroadcaster::new("chat");
    let (first, mut first_rx) = Client::channel();
    let (second, mut second_rx) = Client::channel();
    broadcaster.subscribe(first);
    broadcaster.subscribe(second);

    broadcaster.new_message(chat("alice", "go"));

    assert_eq!(first_rx.try_recv().unwrap(), chat("alice", "go"));
    assert_eq!(second_rx.try_recv().unwrap(), chat("alice", "go"));
}

#[test]
fn test_broadcaster_preserves_publish_order() {
    let broadcaster = ChatMessageBroadcaster::new("chat");
    let (client, mut rx) = Client::channel();
    broadcaster.subscribe(client);

    for n in 0..20 {
        broadcaster.new_message(chat("alice", &n.to_string()));
    }

    for n in 0..20 {
        assert_eq!(rx.try_recv().unwrap().text, n.to_string());
    }
}

#[test]
fn test_broadcaster_subscribe_twice_delivers_once() {
    let broadcaster = ChatMessageBroadcaster::new("chat");
    let (client, mut rx) = Client::channel();
    broadcaster.subscribe(client.clone());
    broadcaster.subscribe(client);

    broadcaster.new_message(chat("alice", "go"));

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
    assert_eq!(broadcaster.subscriber_count(), 1);
}

#[test]
fn test_broadcaster_unsubscribe() {
    let broadcaster = ChatMessageBroadcaster::new("chat");
    let (client, mut rx) = Client::channel();
    let id = broadcaster.subscribe(client);

    broadcaster.unsubscribe(&id);
    broadcaster.unsubscribe(&id);
    broadcaster.new_message(chat("alice", "go"));

    assert!(rx.try_recv().is_err());
    assert!(!broadcaster.is_subscribed(&id));
}

#[test]
fn test_broadcaster_does_not_replay_to_late_subscribers() {
    let broadcaster = ChatMessageBroadcaster::new("chat");
    broadcaster.new_message(chat("alice", "early"));

    let (client, mut rx) = Client::channel();
    broadcaster.subscribe(client);

    assert!(rx.try_recv().is_err());
}

#[test]
fn test_broadcaster_clones_share_subscribers() {
    let broadcaster = ChatMessageBroadcaster::new("chat");
    let clone = broadcaster.clone();
    let (client, mut rx) = Client::channel();
    clone.subscribe(client);

    broadcaster.new_message(chat("alice", "go"));

    assert!(rx.try_recv().is_ok());
    assert_eq!(clone.name(), "chat");
}

#[test]
fn test_broadcaster_publish_to_closed_channel_unsubscribes() {
    let broadcaster = ChatMessageBroadcaster::new("chat");
    let (client, rx) = Client::channel();
    let id = broadcaster.subscribe(client);

    // Drop the receiver to close the channel
    drop(rx);
    broadcaster.new_message(chat("alice", "go"));

    assert!(!broadcaster.is_subscribed(&id));
}

#[test]
fn test_broadcaster_publish_without_subscribers() {
    let broadcaster = ChatMessageBroadcaster::new("chat");
    broadcaster.new_message(chat("alice", "go"));
    // No assertion, just checking for no panics.
}

#[test]
fn test_transcription_broadcaster_wraps_text() {
    let transcriptions = TranscriptionBroadcaster::new();
    let (client, mut rx) = Client::channel();
    transcriptions.subscribe(client);

    transcriptions.new_transcription_text("hello world");

    assert_eq!(
        rx.try_recv().unwrap(),
        Transcript {
            text: "hello world".to_string()
        }
    );
}

#[test]
fn test_transcription_broadcaster_is_live_only() {
    let transcriptions = TranscriptionBroadcaster::new();
    transcriptions.new_transcription_text("before");

    let (client, mut rx) = Client::channel();
    let id = transcriptions.subscribe(client);
    assert!(rx.try_recv().is_err());

    transcriptions.unsubscribe(&id);
    transcriptions.new_transcription_text("after");
    assert!(rx.try_recv().is_err());
    assert_eq!(transcriptions.subscriber_count(), 0);
}

#[test]
fn test_transcript_serializes_as_transcription_text() {
    let json = serde_json::to_string(&Transcript {
        text: "hi".to_string(),
    })
    .unwrap();
    assert_eq!(json, r#"{"transcriptionText":"hi"}"#);
}

#[test]
fn test_unbounded_channel_client_receives_in_order_across_threads() {
    let broadcaster = ChatMessageBroadcaster::new("chat");
    let (tx, mut rx) = mpsc::unbounded_channel();
    broadcaster.subscribe(Client::new(tx));

    let handles: Vec<_> = (0..4)
        .map(|thread| {
            let broadcaster = broadcaster.clone();
            std::thread::spawn(move || {
                for n in 0..50 {
                    broadcaster.new_message(chat(&thread.to_string(), &n.to_string()));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut last_by_sender = [-1i32; 4];
    while let Ok(msg) = rx.try_recv() {
        let sender: usize = msg.sender.parse().unwrap();
        let n: i32 = msg.text.parse().unwrap();
        assert!(n > last_by_sender[sender]);
        last_by_sender[sender] = n;
    }
    assert_eq!(last_by_sender, [49; 4]);
}
