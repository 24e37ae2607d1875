use super::*;
use crate::domain::models::Role;

#[test]
fn it_starts_empty_and_idle() {
    let store = SessionStore::new();
    assert!(store.is_empty());
    assert_eq!(store.status(), Status::Idle);
    assert_eq!(store.last_message(), None);
}

#[test]
fn it_appends_in_insertion_order() {
    let store = SessionStore::new();
    assert!(store.append_message(Message::user("List open issues")));
    assert!(store.append_message(Message::assistant("3 issues found...")));
    assert!(store.append_message(Message::user("Close TEST-1")));

    let history = store.snapshot();
    assert_eq!(
        history
            .iter()
            .map(|message| message.content.as_str())
            .collect::<Vec<_>>(),
        vec!["List open issues", "3 issues found...", "Close TEST-1"]
    );
    assert_eq!(store.len(), 3);
    assert_eq!(store.last_message().unwrap().content, "Close TEST-1");
}

#[test]
fn it_refuses_blank_messages() {
    let store = SessionStore::new();
    assert!(!store.append_message(Message::assistant("   ")));
    assert!(store.is_empty());
}

#[test]
fn it_does_not_enforce_status_transitions() {
    let store = SessionStore::new();
    store.set_status(Status::Error);
    assert_eq!(store.status(), Status::Error);
    store.set_status(Status::Pending);
    assert_eq!(store.status(), Status::Pending);
}

#[test]
fn it_snapshots_independently_of_later_appends() {
    let store = SessionStore::new();
    store.append_message(Message::user("first"));
    let snapshot = store.snapshot();
    store.append_message(Message::assistant("second"));

    assert_eq!(snapshot.len(), 1);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn it_notifies_subscribers_in_mutation_order() {
    let store = SessionStore::new();
    let mut rx = store.subscribe();

    store.append_message(Message::user("hi"));
    store.set_status(Status::Pending);
    store.append_message(Message::new(Role::System, "note"));
    store.clear();

    assert_eq!(
        rx.recv().await.unwrap(),
        SessionEvent::MessageAppended {
            index: 0,
            message: Message::user("hi")
        }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        SessionEvent::StatusChanged(Status::Pending)
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        SessionEvent::MessageAppended {
            index: 1,
            message: Message::new(Role::System, "note")
        }
    );
    assert_eq!(rx.recv().await.unwrap(), SessionEvent::Reset);
    assert!(store.is_empty());
    assert_eq!(store.status(), Status::Idle);
}

#[test]
fn it_prunes_dropped_subscribers() {
    let store = SessionStore::new();
    let rx = store.subscribe();
    let mut kept = store.subscribe();
    drop(rx);

    store.append_message(Message::user("hi"));

    assert_eq!(store.subscribers().len(), 1);
    assert!(kept.try_recv().is_ok());
}
