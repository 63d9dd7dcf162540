use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for invitation records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvitationId(pub String);

/// Lifecycle of an invitation. Only `Pending` is written by this core;
/// acceptance and decline happen on the tenant's side of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

/// A sender-initiated record inviting a tenant to consider a listing.
///
/// Immutable once created in this core's scope. Nothing prevents two
/// invitations for the same (sender, tenant, listing); see the design notes
/// for the open idempotency question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub sender_id: String,
    pub tenant_id: String,
    pub listing_id: String,
    #[serde(default)]
    pub message: Option<String>,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload accepted from the sending page.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteRequest {
    pub sender_id: String,
    pub tenant_id: String,
    pub listing_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Sanitized representation returned from the HTTP surface.
#[derive(Debug, Clone, Serialize)]
pub struct InvitationView {
    pub id: InvitationId,
    pub sender_id: String,
    pub tenant_id: String,
    pub listing_id: String,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<&Invitation> for InvitationView {
    fn from(invitation: &Invitation) -> Self {
        Self {
            id: invitation.id.clone(),
            sender_id: invitation.sender_id.clone(),
            tenant_id: invitation.tenant_id.clone(),
            listing_id: invitation.listing_id.clone(),
            status: invitation.status.label(),
            created_at: invitation.created_at,
        }
    }
}
