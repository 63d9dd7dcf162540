use super::domain::{Invitation, InvitationId};
use crate::workflows::RepositoryError;

/// Storage abstraction so the service module can be exercised in isolation.
pub trait InvitationRepository: Send + Sync {
    fn insert(&self, invitation: Invitation) -> Result<Invitation, RepositoryError>;
    fn fetch(&self, id: &InvitationId) -> Result<Option<Invitation>, RepositoryError>;
    fn for_sender(&self, sender_id: &str) -> Result<Vec<Invitation>, RepositoryError>;
}
