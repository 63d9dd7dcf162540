//! Marketplace workflows: tenant invitations and property showings.
//!
//! Both follow the same layering: a `domain` module with the records and
//! status enums, a `repository` trait so the service can be exercised against
//! in-memory adapters, a `service` orchestrating the steps, and an axum
//! `router` exposing the HTTP surface.

pub mod invitations;
pub mod showings;

/// Error enumeration for persistence failures. A rejected write aborts the
/// current workflow step; it never shares a channel with notification
/// delivery.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Pre-submission form/schema failures, surfaced inline to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },
}
