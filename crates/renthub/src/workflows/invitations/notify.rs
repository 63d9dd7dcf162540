use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload delivered to the automation webhook when an invite is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteNotification {
    pub tenant_id: String,
    pub sender_id: String,
    pub listing_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Delivery failure. Logged by the caller, never surfaced, never retried.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport failed: {0}")]
    Transport(String),
    #[error("notification endpoint answered {status}")]
    Rejected { status: u16 },
}

/// Outbound notification seam so tests and the demo substitute a recorder.
///
/// Delivery is at-most-once: implementations must not retry, and callers must
/// not let a delivery failure affect the workflow outcome.
#[async_trait]
pub trait InviteNotifier: Send + Sync {
    async fn notify(&self, notification: InviteNotification) -> Result<(), NotificationError>;
}

/// Fire-and-continue POST to the configured automation endpoint. The response
/// body is never consumed; only the status line is inspected.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl InviteNotifier for WebhookNotifier {
    async fn notify(&self, notification: InviteNotification) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.url)
            .json(&notification)
            .send()
            .await
            .map_err(|err| NotificationError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotificationError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
