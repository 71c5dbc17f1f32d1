use super::{Problems, Store, StoreError};
use crate::model::{CreateNotificationOptions, EntityKind, Notification};
use crate::utils::{generate_id, now};
use tracing::debug;

impl Store {
    pub async fn create_notification(
        &self,
        options: CreateNotificationOptions,
    ) -> Result<Notification, StoreError> {
        let mut problems = Problems::new();
        problems.require("userId", &options.user_id);
        problems.require("title", &options.title);
        problems.into_result()?;

        let notification = Notification {
            id: generate_id(),
            user_id: options.user_id,
            title: options.title,
            message: options.message,
            kind: options.kind,
            read: false,
            created_at: now(),
            work_order_id: options.work_order_id,
            ticket_id: options.ticket_id,
        };
        let mut notifications = self.notifications.lock().await;
        notifications.push(notification.clone());
        self.persist(&notifications).await;
        debug!("Notified {}: {}", notification.user_id, notification.title);
        Ok(notification)
    }

    /// Mark one notification read. Marking an already-read notification is a
    /// no-op; nothing is rewritten.
    pub async fn mark_as_read(&self, id: &str) -> Result<Notification, StoreError> {
        let mut notifications = self.notifications.lock().await;
        let notification = notifications
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Notification, id))?;
        if notification.read {
            return Ok(notification.clone());
        }
        notification.read = true;
        let marked = notification.clone();
        self.persist(&notifications).await;
        Ok(marked)
    }

    /// Mark every unread notification of `user_id` read. Returns how many changed.
    pub async fn mark_all_as_read(&self, user_id: &str) -> usize {
        let mut notifications = self.notifications.lock().await;
        let unread: Vec<String> = notifications
            .items()
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .map(|n| n.id.clone())
            .collect();
        for id in &unread {
            if let Some(n) = notifications.get_mut(id) {
                n.read = true;
            }
        }
        if !unread.is_empty() {
            self.persist(&notifications).await;
        }
        unread.len()
    }

    /// Returns whether anything was removed.
    pub async fn delete_notification(&self, id: &str) -> bool {
        let mut notifications = self.notifications.lock().await;
        if notifications.remove(id).is_none() {
            return false;
        }
        self.persist(&notifications).await;
        true
    }

    pub async fn query_notifications(
        &self,
        predicate: impl Fn(&Notification) -> bool,
    ) -> Vec<Notification> {
        self.notifications.lock().await.query(predicate)
    }
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
