pub mod inbox;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::notification::NotificationKind;

pub use inbox::InboxNotifier;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifier rejected message: {0}")]
    Rejected(String),

    #[error("notifier unreachable: {0}")]
    Unreachable(String),
}

/// Delivery transport for user-facing messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        recipient_id: Uuid,
        kind: NotificationKind,
        text: &str,
        order_id: Option<Uuid>,
    ) -> Result<(), NotifyError>;
}
