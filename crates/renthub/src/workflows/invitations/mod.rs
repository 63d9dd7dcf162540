//! Tenant-invitation workflow: an agent, landlord, or admin invites a tenant
//! to consider a listing. Persistence is the workflow's outcome; the outbound
//! notification is strictly best-effort and never affects the result.

pub mod domain;
pub mod notify;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Invitation, InvitationId, InvitationStatus, InvitationView, InviteRequest};
pub use notify::{InviteNotification, InviteNotifier, NotificationError, WebhookNotifier};
pub use repository::InvitationRepository;
pub use router::invitation_router;
pub use service::{InvitationError, InvitationService};
