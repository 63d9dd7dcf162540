//! Property-showing workflow: a tenant requests a viewing, the listing side
//! confirms, reschedules, cancels, or completes it. Transitions are validated
//! against an explicit table; every mutation returns the refreshed full list
//! so callers never rely on an optimistic local update.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{PropertyShowing, ShowingId, ShowingRequest, ShowingStatus, ShowingView};
pub use repository::ShowingRepository;
pub use router::showing_router;
pub use service::{ShowingError, ShowingOutcome, ShowingService};
