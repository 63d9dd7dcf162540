use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for showing records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShowingId(pub String);

/// Lifecycle of a showing.
///
/// `Rescheduled` exists in the vocabulary but a reschedule lands the record
/// back on `Confirmed`; see [`crate::workflows::showings::service`] for the
/// preserved name/effect mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowingStatus {
    Requested,
    Confirmed,
    Completed,
    Cancelled,
    Rescheduled,
}

impl ShowingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rescheduled => "rescheduled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// The validated transition table:
    /// `requested -> confirmed -> completed`, cancellation from either active
    /// state, and `requested|confirmed -> rescheduled -> confirmed`.
    pub fn can_transition(self, next: Self) -> bool {
        match self {
            Self::Requested => matches!(next, Self::Confirmed | Self::Cancelled | Self::Rescheduled),
            Self::Confirmed => matches!(next, Self::Completed | Self::Cancelled | Self::Rescheduled),
            Self::Rescheduled => matches!(next, Self::Confirmed),
            Self::Completed | Self::Cancelled => false,
        }
    }
}

impl fmt::Display for ShowingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scheduled or requested viewing of a listing by a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyShowing {
    pub id: ShowingId,
    pub listing_id: String,
    pub tenant_id: String,
    pub requested_date: NaiveDate,
    pub requested_time: NaiveTime,
    #[serde(default)]
    pub actual_date: Option<NaiveDate>,
    #[serde(default)]
    pub actual_time: Option<NaiveTime>,
    pub status: ShowingStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload accepted when a tenant requests a viewing.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowingRequest {
    pub listing_id: String,
    pub tenant_id: String,
    pub requested_date: NaiveDate,
    pub requested_time: NaiveTime,
    #[serde(default)]
    pub message: Option<String>,
}

/// Representation returned from the HTTP surface.
#[derive(Debug, Clone, Serialize)]
pub struct ShowingView {
    pub id: ShowingId,
    pub listing_id: String,
    pub tenant_id: String,
    pub requested_date: NaiveDate,
    pub requested_time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<NaiveTime>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PropertyShowing> for ShowingView {
    fn from(showing: &PropertyShowing) -> Self {
        Self {
            id: showing.id.clone(),
            listing_id: showing.listing_id.clone(),
            tenant_id: showing.tenant_id.clone(),
            requested_date: showing.requested_date,
            requested_time: showing.requested_time,
            actual_date: showing.actual_date,
            actual_time: showing.actual_time,
            status: showing.status.label(),
            notes: showing.notes.clone(),
            updated_at: showing.updated_at,
        }
    }
}
