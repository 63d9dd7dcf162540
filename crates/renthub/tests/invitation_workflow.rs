//! Integration tests for the tenant-invitation workflow.
//!
//! Scenarios drive the public service facade against in-memory adapters so
//! the persistence-before-notification ordering and the best-effort delivery
//! semantics can be asserted without a live backend.

mod common {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use renthub::workflows::invitations::{
        Invitation, InvitationId, InvitationRepository, InviteNotification, InviteNotifier,
        InviteRequest, NotificationError,
    };
    use renthub::workflows::RepositoryError;

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        records: Mutex<Vec<Invitation>>,
        reject_inserts: AtomicBool,
    }

    impl MemoryRepository {
        pub(super) fn reject_inserts(&self) {
            self.reject_inserts.store(true, Ordering::Relaxed);
        }

        pub(super) fn records(&self) -> Vec<Invitation> {
            self.records.lock().expect("repository mutex poisoned").clone()
        }
    }

    impl InvitationRepository for MemoryRepository {
        fn insert(&self, invitation: Invitation) -> Result<Invitation, RepositoryError> {
            if self.reject_inserts.load(Ordering::Relaxed) {
                return Err(RepositoryError::Unavailable("insert rejected".to_string()));
            }
            let mut guard = self.records.lock().expect("repository mutex poisoned");
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

    #[derive(Default)]
    pub(super) struct RecordingNotifier {
        pub(super) delivered: Mutex<Vec<InviteNotification>>,
        fail_delivery: AtomicBool,
    }

    impl RecordingNotifier {
        pub(super) fn fail_delivery(&self) {
            self.fail_delivery.store(true, Ordering::Relaxed);
        }

        pub(super) fn attempts(&self) -> usize {
            self.delivered.lock().expect("notifier mutex poisoned").len()
        }
    }

    #[async_trait]
    impl InviteNotifier for RecordingNotifier {
        async fn notify(&self, notification: InviteNotification) -> Result<(), NotificationError> {
            if self.fail_delivery.load(Ordering::Relaxed) {
                return Err(NotificationError::Transport(
                    "endpoint unreachable".to_string(),
                ));
            }
            self.delivered
                .lock()
                .expect("notifier mutex poisoned")
                .push(notification);
            Ok(())
        }
    }

    pub(super) fn request() -> InviteRequest {
        InviteRequest {
            sender_id: "agent-7".to_string(),
            tenant_id: "tenant-12".to_string(),
            listing_id: "listing-88".to_string(),
            message: Some("This two-bedroom matches your search.".to_string()),
        }
    }

    pub(super) fn harness() -> (
        Arc<MemoryRepository>,
        Arc<RecordingNotifier>,
        renthub::workflows::invitations::InvitationService<MemoryRepository, RecordingNotifier>,
    ) {
        let repository = Arc::new(MemoryRepository::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = renthub::workflows::invitations::InvitationService::new(
            repository.clone(),
            notifier.clone(),
        );
        (repository, notifier, service)
    }
}

use renthub::workflows::invitations::{InvitationError, InvitationStatus};
use renthub::workflows::{RepositoryError, ValidationError};

#[tokio::test]
async fn send_invite_persists_exactly_one_pending_record() {
    let (repository, notifier, service) = common::harness();

    let invitation = service
        .send_invite(common::request())
        .await
        .expect("invite sends");

    assert_eq!(invitation.status, InvitationStatus::Pending);
    let records = repository.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, invitation.id);
    assert_eq!(notifier.attempts(), 1);
}

#[tokio::test]
async fn notification_carries_the_invite_identifiers_and_timestamp() {
    let (_repository, notifier, service) = common::harness();

    let invitation = service
        .send_invite(common::request())
        .await
        .expect("invite sends");

    let delivered = notifier.delivered.lock().expect("notifier mutex poisoned");
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].tenant_id, "tenant-12");
    assert_eq!(delivered[0].sender_id, "agent-7");
    assert_eq!(delivered[0].listing_id, "listing-88");
    assert_eq!(delivered[0].timestamp, invitation.created_at);
}

#[tokio::test]
async fn unreachable_notification_endpoint_does_not_fail_the_workflow() {
    let (repository, notifier, service) = common::harness();
    notifier.fail_delivery();

    let invitation = service
        .send_invite(common::request())
        .await
        .expect("insert success is the workflow outcome");

    assert_eq!(invitation.status, InvitationStatus::Pending);
    assert_eq!(repository.records().len(), 1);
    assert_eq!(notifier.attempts(), 0);
}

#[tokio::test]
async fn rejected_insert_aborts_before_any_notification_attempt() {
    let (repository, notifier, service) = common::harness();
    repository.reject_inserts();

    match service.send_invite(common::request()).await {
        Err(InvitationError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected persistence failure, got {other:?}"),
    }

    assert!(repository.records().is_empty());
    assert_eq!(notifier.attempts(), 0);
}

#[tokio::test]
async fn blank_tenant_id_is_rejected_before_persistence() {
    let (repository, notifier, service) = common::harness();

    let mut request = common::request();
    request.tenant_id = "  ".to_string();

    match service.send_invite(request).await {
        Err(InvitationError::Validation(ValidationError::MissingField { field })) => {
            assert_eq!(field, "tenant_id");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    assert!(repository.records().is_empty());
    assert_eq!(notifier.attempts(), 0);
}

#[tokio::test]
async fn duplicate_sends_create_two_records() {
    // No idempotency key is enforced; the same invite sent twice is two rows.
    let (repository, _notifier, service) = common::harness();

    let first = service
        .send_invite(common::request())
        .await
        .expect("first send");
    let second = service
        .send_invite(common::request())
        .await
        .expect("second send");

    assert_ne!(first.id, second.id);
    assert_eq!(repository.records().len(), 2);

    let for_sender = service.for_sender("agent-7").expect("listing works");
    assert_eq!(for_sender.len(), 2);
}
