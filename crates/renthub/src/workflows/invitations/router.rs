use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{InvitationId, InvitationView, InviteRequest};
use super::notify::InviteNotifier;
use super::repository::InvitationRepository;
use super::service::{InvitationError, InvitationService};
use crate::access::{AccessDecision, Permission, PermissionPolicy, UserSnapshot};
use crate::workflows::RepositoryError;

/// Shared state for the invitation endpoints: the workflow service plus the
/// access policy consulted before a send is accepted.
pub struct InvitationRoutes<R, N> {
    pub service: Arc<InvitationService<R, N>>,
    pub policy: Arc<PermissionPolicy>,
}

impl<R, N> Clone for InvitationRoutes<R, N> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            policy: self.policy.clone(),
        }
    }
}

/// Router builder exposing HTTP endpoints for sending and inspecting invites.
pub fn invitation_router<R, N>(
    service: Arc<InvitationService<R, N>>,
    policy: Arc<PermissionPolicy>,
) -> Router
where
    R: InvitationRepository + 'static,
    N: InviteNotifier + 'static,
{
    let state = InvitationRoutes { service, policy };
    Router::new()
        .route(
            "/api/v1/invitations",
            post(send_handler::<R, N>).get(list_handler::<R, N>),
        )
        .route(
            "/api/v1/invitations/:invitation_id",
            get(status_handler::<R, N>),
        )
        .with_state(state)
}

pub(crate) async fn send_handler<R, N>(
    State(routes): State<InvitationRoutes<R, N>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<InviteRequest>,
) -> Response
where
    R: InvitationRepository + 'static,
    N: InviteNotifier + 'static,
{
    let snapshot = UserSnapshot::from_headers(&headers);
    match routes
        .policy
        .resolve(snapshot.as_ref(), Permission::SendInvitations)
    {
        AccessDecision::Loading => {
            let payload = json!({ "status": "loading" });
            return (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response();
        }
        AccessDecision::Denied(ground) => {
            let payload = json!({
                "error": "sending invitations is not available to this account",
                "ground": ground,
            });
            return (StatusCode::FORBIDDEN, axum::Json(payload)).into_response();
        }
        AccessDecision::Allowed => {}
    }

    match routes.service.send_invite(request).await {
        Ok(invitation) => {
            let view = InvitationView::from(&invitation);
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(routes): State<InvitationRoutes<R, N>>,
    Path(invitation_id): Path<String>,
) -> Response
where
    R: InvitationRepository + 'static,
    N: InviteNotifier + 'static,
{
    let id = InvitationId(invitation_id);
    match routes.service.get(&id) {
        Ok(invitation) => {
            let view = InvitationView::from(&invitation);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SenderQuery {
    pub(crate) sender_id: String,
}

pub(crate) async fn list_handler<R, N>(
    State(routes): State<InvitationRoutes<R, N>>,
    Query(query): Query<SenderQuery>,
) -> Response
where
    R: InvitationRepository + 'static,
    N: InviteNotifier + 'static,
{
    match routes.service.for_sender(&query.sender_id) {
        Ok(invitations) => {
            let views: Vec<InvitationView> = invitations.iter().map(InvitationView::from).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: InvitationError) -> Response {
    let (status, payload) = match &err {
        InvitationError::Validation(validation) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": validation.to_string() }),
        ),
        InvitationError::Repository(RepositoryError::NotFound) => (
            StatusCode::NOT_FOUND,
            json!({ "error": "invitation not found" }),
        ),
        InvitationError::Repository(RepositoryError::Conflict) => (
            StatusCode::CONFLICT,
            json!({ "error": "invitation already exists" }),
        ),
        InvitationError::Repository(RepositoryError::Unavailable(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": err.to_string() }),
        ),
    };
    (status, axum::Json(payload)).into_response()
}
