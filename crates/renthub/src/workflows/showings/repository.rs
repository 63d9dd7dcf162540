use super::domain::{PropertyShowing, ShowingId};
use crate::workflows::RepositoryError;

/// Storage abstraction for showing records. `list_all` backs the full-reload
/// consistency model: every mutation is followed by a complete re-fetch.
pub trait ShowingRepository: Send + Sync {
    fn insert(&self, showing: PropertyShowing) -> Result<PropertyShowing, RepositoryError>;
    fn update(&self, showing: PropertyShowing) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ShowingId) -> Result<Option<PropertyShowing>, RepositoryError>;
    fn list_all(&self) -> Result<Vec<PropertyShowing>, RepositoryError>;
}
