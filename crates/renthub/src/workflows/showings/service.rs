use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};

use super::domain::{PropertyShowing, ShowingId, ShowingRequest, ShowingStatus};
use super::repository::ShowingRepository;
use crate::workflows::{RepositoryError, ValidationError};

static SHOWING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_showing_id() -> ShowingId {
    let id = SHOWING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ShowingId(format!("show-{id:06}"))
}

/// The mutated record plus the refreshed full list. Consistency comes from the
/// re-fetch, not from patching a local copy.
#[derive(Debug, Clone)]
pub struct ShowingOutcome {
    pub showing: PropertyShowing,
    pub all: Vec<PropertyShowing>,
}

/// Service owning showing lifecycle operations.
pub struct ShowingService<R> {
    repository: Arc<R>,
}

impl<R> ShowingService<R>
where
    R: ShowingRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new showing in the `Requested` state.
    pub fn request_showing(
        &self,
        request: ShowingRequest,
    ) -> Result<ShowingOutcome, ShowingError> {
        for (field, value) in [
            ("listing_id", &request.listing_id),
            ("tenant_id", &request.tenant_id),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField { field }.into());
            }
        }

        let now = Utc::now();
        let showing = PropertyShowing {
            id: next_showing_id(),
            listing_id: request.listing_id,
            tenant_id: request.tenant_id,
            requested_date: request.requested_date,
            requested_time: request.requested_time,
            actual_date: None,
            actual_time: None,
            status: ShowingStatus::Requested,
            message: request.message,
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(showing)?;
        self.outcome(stored)
    }

    /// Move a showing to `new_status`, appending optional notes.
    ///
    /// Unlike the permissive overwrite this replaces, transitions are checked
    /// against the table in
    /// [`ShowingStatus::can_transition`]; an illegal move is reported as
    /// [`ShowingError::InvalidTransition`] and nothing is written.
    pub fn update_status(
        &self,
        id: &ShowingId,
        new_status: ShowingStatus,
        notes: Option<String>,
    ) -> Result<ShowingOutcome, ShowingError> {
        let mut showing = self.fetch(id)?;

        if !showing.status.can_transition(new_status) {
            return Err(ShowingError::InvalidTransition {
                from: showing.status,
                to: new_status,
            });
        }

        showing.status = new_status;
        if let Some(incoming) = notes {
            showing.notes = Some(match showing.notes.take() {
                Some(existing) => format!("{existing}\n{incoming}"),
                None => incoming,
            });
        }
        showing.updated_at = Utc::now();

        self.repository.update(showing.clone())?;
        self.outcome(showing)
    }

    /// Set the actual date/time for a showing and confirm it.
    ///
    /// The status lands on `Confirmed`, not `Rescheduled` — the historical
    /// behavior the vocabulary's `Rescheduled` name does not reflect. Kept
    /// deliberately so downstream consumers keyed on `confirmed` keep working.
    pub fn reschedule(
        &self,
        id: &ShowingId,
        new_date: NaiveDate,
        new_time: NaiveTime,
    ) -> Result<ShowingOutcome, ShowingError> {
        let mut showing = self.fetch(id)?;

        if showing.status.is_terminal() {
            return Err(ShowingError::InvalidTransition {
                from: showing.status,
                to: ShowingStatus::Confirmed,
            });
        }

        showing.actual_date = Some(new_date);
        showing.actual_time = Some(new_time);
        showing.status = ShowingStatus::Confirmed;
        showing.updated_at = Utc::now();

        self.repository.update(showing.clone())?;
        self.outcome(showing)
    }

    pub fn get(&self, id: &ShowingId) -> Result<PropertyShowing, ShowingError> {
        self.fetch(id)
    }

    pub fn list(&self) -> Result<Vec<PropertyShowing>, ShowingError> {
        let all = self.repository.list_all()?;
        Ok(all)
    }

    fn fetch(&self, id: &ShowingId) -> Result<PropertyShowing, ShowingError> {
        let showing = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(showing)
    }

    fn outcome(&self, showing: PropertyShowing) -> Result<ShowingOutcome, ShowingError> {
        let all = self.repository.list_all()?;
        Ok(ShowingOutcome { showing, all })
    }
}

/// Error raised by the showing service.
#[derive(Debug, thiserror::Error)]
pub enum ShowingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("cannot move a {from} showing to {to}")]
    InvalidTransition {
        from: ShowingStatus,
        to: ShowingStatus,
    },
}
