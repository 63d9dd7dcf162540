use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use renthub::config::NotificationConfig;
use renthub::directory::TenantProfile;
use renthub::workflows::invitations::{
    Invitation, InvitationId, InvitationRepository, InviteNotification, InviteNotifier,
    NotificationError, WebhookNotifier,
};
use renthub::workflows::showings::{PropertyShowing, ShowingId, ShowingRepository};
use renthub::workflows::RepositoryError;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryInvitationRepository {
    records: Arc<Mutex<Vec<Invitation>>>,
}

impl InvitationRepository for InMemoryInvitationRepository {
    fn insert(&self, invitation: Invitation) -> Result<Invitation, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|record| record.id == invitation.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(invitation.clone());
        Ok(invitation)
    }

    fn fetch(&self, id: &InvitationId) -> Result<Option<Invitation>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn for_sender(&self, sender_id: &str) -> Result<Vec<Invitation>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.sender_id == sender_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryShowingRepository {
    records: Arc<Mutex<BTreeMap<String, PropertyShowing>>>,
}

impl ShowingRepository for InMemoryShowingRepository {
    fn insert(&self, showing: PropertyShowing) -> Result<PropertyShowing, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&showing.id.0) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(showing.id.0.clone(), showing.clone());
        Ok(showing)
    }

    fn update(&self, showing: PropertyShowing) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&showing.id.0) {
            guard.insert(showing.id.0.clone(), showing);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ShowingId) -> Result<Option<PropertyShowing>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn list_all(&self) -> Result<Vec<PropertyShowing>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Notifier selected from configuration: a real webhook when a URL is set,
/// otherwise a no-op that only logs the skipped delivery.
pub(crate) enum ConfiguredNotifier {
    Webhook(WebhookNotifier),
    Disabled,
}

impl ConfiguredNotifier {
    pub(crate) fn from_config(config: &NotificationConfig) -> Self {
        match config.webhook_url.as_deref() {
            Some(url) => Self::Webhook(WebhookNotifier::new(url)),
            None => Self::Disabled,
        }
    }
}

#[async_trait]
impl InviteNotifier for ConfiguredNotifier {
    async fn notify(&self, notification: InviteNotification) -> Result<(), NotificationError> {
        match self {
            Self::Webhook(webhook) => webhook.notify(notification).await,
            Self::Disabled => {
                debug!(tenant = %notification.tenant_id, "invite notification skipped: no webhook configured");
                Ok(())
            }
        }
    }
}

/// Recorder used by the demo command and router tests.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    delivered: Mutex<Vec<InviteNotification>>,
}

impl RecordingNotifier {
    pub(crate) fn delivered(&self) -> Vec<InviteNotification> {
        self.delivered.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl InviteNotifier for RecordingNotifier {
    async fn notify(&self, notification: InviteNotification) -> Result<(), NotificationError> {
        self.delivered
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

/// Stand-in directory data until the relational collaborator is wired up.
pub(crate) fn sample_tenants() -> Vec<TenantProfile> {
    vec![
        TenantProfile {
            tenant_id: "tenant-demo-1".to_string(),
            email: "jordan@example.com".to_string(),
            bio: Some("Remote engineer looking for a quiet block.".to_string()),
            household_income: Some(5200),
            household_size: Some(2),
            has_pets: Some(false),
            preferred_locations: vec!["Des Moines".to_string()],
            move_in_date: NaiveDate::from_ymd_opt(2025, 10, 1),
        },
        TenantProfile {
            tenant_id: "tenant-demo-2".to_string(),
            email: "casey@example.com".to_string(),
            bio: Some("Family of four with a golden retriever.".to_string()),
            household_income: Some(3900),
            household_size: Some(4),
            has_pets: Some(true),
            preferred_locations: vec!["Ankeny".to_string(), "Urbandale".to_string()],
            move_in_date: NaiveDate::from_ymd_opt(2025, 12, 1),
        },
        TenantProfile {
            tenant_id: "tenant-demo-3".to_string(),
            email: "river@example.com".to_string(),
            bio: None,
            household_income: None,
            household_size: Some(1),
            has_pets: None,
            preferred_locations: Vec::new(),
            move_in_date: None,
        },
    ]
}
