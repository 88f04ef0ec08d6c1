use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::notification::{Notification, NotificationKind};
use crate::notify::{Notifier, NotifyError};

/// Notifier that keeps every message as a [`Notification`] record and
/// republishes it to live subscribers.
pub struct InboxNotifier {
    notifications: DashMap<Uuid, Notification>,
    events_tx: broadcast::Sender<Notification>,
}

impl InboxNotifier {
    pub fn new(event_buffer_size: usize) -> Self {
        let (events_tx, _unused_rx) = broadcast::channel(event_buffer_size);
        Self {
            notifications: DashMap::new(),
            events_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.events_tx.subscribe()
    }

    /// Newest first.
    pub fn list_for(&self, recipient_id: Uuid, unread_only: bool) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|entry| {
                let n = entry.value();
                n.recipient_id == recipient_id && (!unread_only || !n.read)
            })
            .map(|entry| entry.value().clone())
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications
    }

    pub fn mark_read(&self, id: Uuid, recipient_id: Uuid) -> Result<Notification, AppError> {
        let mut notification = self
            .notifications
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("notification {id}")))?;

        // Someone else's notification is reported as missing.
        if notification.recipient_id != recipient_id {
            return Err(AppError::NotFound(format!("notification {id}")));
        }

        notification.read = true;
        Ok(notification.clone())
    }

    /// Returns how many notifications flipped to read.
    pub fn mark_all_read(&self, recipient_id: Uuid) -> usize {
        let mut marked = 0;
        for mut entry in self.notifications.iter_mut() {
            let n = entry.value_mut();
            if n.recipient_id == recipient_id && !n.read {
                n.read = true;
                marked += 1;
            }
        }
        marked
    }

    pub fn count(&self) -> usize {
        self.notifications.len()
    }
}

#[async_trait]
impl Notifier for InboxNotifier {
    async fn send(
        &self,
        recipient_id: Uuid,
        kind: NotificationKind,
        text: &str,
        order_id: Option<Uuid>,
    ) -> Result<(), NotifyError> {
        let notification = Notification {
            id: Uuid::new_v4(),
            recipient_id,
            kind,
            message: text.to_string(),
            order_id,
            read: false,
            created_at: Utc::now(),
        };

        self.notifications
            .insert(notification.id, notification.clone());
        let _ = self.events_tx.send(notification);
        Ok(())
    }
}
