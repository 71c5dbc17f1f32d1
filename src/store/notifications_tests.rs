use super::*;
use crate::model::NotificationKind;
use crate::test_fixtures::open_empty_store;

fn note(user: &str, title: &str) -> CreateNotificationOptions {
    CreateNotificationOptions {
        user_id: user.to_string(),
        title: title.to_string(),
        message: format!("{title} para {user}"),
        kind: NotificationKind::Info,
        work_order_id: None,
        ticket_id: None,
    }
}

#[tokio::test]
async fn test_create_notification_is_unread() {
    let (_temp, store) = open_empty_store().await;
    let n = store.create_notification(note("3", "Hola")).await.unwrap();
    assert!(!n.read);
    assert_eq!(n.kind, NotificationKind::Info);
}

#[tokio::test]
async fn test_create_requires_user_and_title() {
    let (_temp, store) = open_empty_store().await;
    assert!(matches!(
        store.create_notification(note("", "Hola")).await,
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        store.create_notification(note("3", "")).await,
        Err(StoreError::Validation(_))
    ));
}

#[tokio::test]
async fn test_mark_as_read_is_idempotent() {
    let (_temp, store) = open_empty_store().await;
    let n = store.create_notification(note("3", "Hola")).await.unwrap();
    let once = store.mark_as_read(&n.id).await.unwrap();
    let twice = store.mark_as_read(&n.id).await.unwrap();
    assert!(once.read);
    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_mark_as_read_unknown_is_not_found() {
    let (_temp, store) = open_empty_store().await;
    assert!(matches!(
        store.mark_as_read("missing").await,
        Err(StoreError::NotFound(EntityKind::Notification, _))
    ));
}

#[tokio::test]
async fn test_mark_all_as_read_only_touches_user() {
    let (_temp, store) = open_empty_store().await;
    store.create_notification(note("3", "Uno")).await.unwrap();
    store.create_notification(note("3", "Dos")).await.unwrap();
    let other = store.create_notification(note("4", "Tres")).await.unwrap();

    assert_eq!(store.mark_all_as_read("3").await, 2);
    assert_eq!(store.mark_all_as_read("3").await, 0);
    let untouched = store.query_notifications(|n| n.id == other.id).await;
    assert!(!untouched[0].read);
}

#[tokio::test]
async fn test_delete_notification() {
    let (_temp, store) = open_empty_store().await;
    let n = store.create_notification(note("3", "Hola")).await.unwrap();
    assert!(store.delete_notification(&n.id).await);
    assert!(!store.delete_notification(&n.id).await);
}
