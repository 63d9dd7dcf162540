use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::domain::{Invitation, InvitationId, InvitationStatus, InviteRequest};
use super::notify::{InviteNotification, InviteNotifier};
use super::repository::InvitationRepository;
use crate::workflows::{RepositoryError, ValidationError};

static INVITATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_invitation_id() -> InvitationId {
    let id = INVITATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    InvitationId(format!("inv-{id:06}"))
}

/// Service composing the invitation repository and the best-effort notifier.
pub struct InvitationService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> InvitationService<R, N>
where
    R: InvitationRepository + 'static,
    N: InviteNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Create a pending invitation, then attempt the outbound notification.
    ///
    /// The two steps are strictly sequential. A rejected insert aborts the
    /// workflow before any notification is attempted; a failed notification
    /// is logged and swallowed, so the reported outcome reflects the insert
    /// alone. Delivery is at-most-once with no retry.
    pub async fn send_invite(
        &self,
        request: InviteRequest,
    ) -> Result<Invitation, InvitationError> {
        validate(&request)?;

        let invitation = Invitation {
            id: next_invitation_id(),
            sender_id: request.sender_id,
            tenant_id: request.tenant_id,
            listing_id: request.listing_id,
            message: request.message,
            status: InvitationStatus::Pending,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(invitation)?;

        let notification = InviteNotification {
            tenant_id: stored.tenant_id.clone(),
            sender_id: stored.sender_id.clone(),
            listing_id: stored.listing_id.clone(),
            timestamp: stored.created_at,
        };
        if let Err(err) = self.notifier.notify(notification).await {
            warn!(invitation = %stored.id.0, %err, "invite notification failed; not retrying");
        }

        Ok(stored)
    }

    pub fn get(&self, id: &InvitationId) -> Result<Invitation, InvitationError> {
        let invitation = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(invitation)
    }

    pub fn for_sender(&self, sender_id: &str) -> Result<Vec<Invitation>, InvitationError> {
        let invitations = self.repository.for_sender(sender_id)?;
        Ok(invitations)
    }
}

fn validate(request: &InviteRequest) -> Result<(), ValidationError> {
    for (field, value) in [
        ("sender_id", &request.sender_id),
        ("tenant_id", &request.tenant_id),
        ("listing_id", &request.listing_id),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField { field });
        }
    }
    Ok(())
}

/// Error raised by the invitation service. Notification delivery is absent on
/// purpose: it never shares a channel with persistence.
#[derive(Debug, thiserror::Error)]
pub enum InvitationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
