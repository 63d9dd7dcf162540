use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ShowingId, ShowingRequest, ShowingStatus, ShowingView};
use super::repository::ShowingRepository;
use super::service::{ShowingError, ShowingOutcome, ShowingService};
use crate::access::{AccessDecision, Permission, PermissionPolicy, UserSnapshot};
use crate::workflows::RepositoryError;

/// Shared state for the showing endpoints.
pub struct ShowingRoutes<R> {
    pub service: Arc<ShowingService<R>>,
    pub policy: Arc<PermissionPolicy>,
}

impl<R> Clone for ShowingRoutes<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            policy: self.policy.clone(),
        }
    }
}

/// Router builder exposing the showing lifecycle over HTTP.
pub fn showing_router<R>(
    service: Arc<ShowingService<R>>,
    policy: Arc<PermissionPolicy>,
) -> Router
where
    R: ShowingRepository + 'static,
{
    let state = ShowingRoutes { service, policy };
    Router::new()
        .route(
            "/api/v1/showings",
            post(request_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/showings/:showing_id", get(detail_handler::<R>))
        .route(
            "/api/v1/showings/:showing_id/status",
            post(status_handler::<R>),
        )
        .route(
            "/api/v1/showings/:showing_id/reschedule",
            post(reschedule_handler::<R>),
        )
        .with_state(state)
}

/// Mutation responses carry the record and the refreshed full list.
#[derive(Debug, Serialize)]
pub(crate) struct ShowingOutcomeView {
    pub(crate) showing: ShowingView,
    pub(crate) all: Vec<ShowingView>,
}

impl From<&ShowingOutcome> for ShowingOutcomeView {
    fn from(outcome: &ShowingOutcome) -> Self {
        Self {
            showing: ShowingView::from(&outcome.showing),
            all: outcome.all.iter().map(ShowingView::from).collect(),
        }
    }
}

/// Every mutating showing endpoint runs the same permission check before it
/// touches the repository; a lookup miss is never observable to a caller the
/// policy turns away.
fn guard_showing_access(policy: &PermissionPolicy, headers: &HeaderMap) -> Option<Response> {
    let snapshot = UserSnapshot::from_headers(headers);
    match policy.resolve(snapshot.as_ref(), Permission::RequestShowings) {
        AccessDecision::Loading => {
            let payload = json!({ "status": "loading" });
            Some((StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response())
        }
        AccessDecision::Denied(ground) => {
            let payload = json!({
                "error": "the showing workflow is not available to this account",
                "ground": ground,
            });
            Some((StatusCode::FORBIDDEN, axum::Json(payload)).into_response())
        }
        AccessDecision::Allowed => None,
    }
}

pub(crate) async fn request_handler<R>(
    State(routes): State<ShowingRoutes<R>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<ShowingRequest>,
) -> Response
where
    R: ShowingRepository + 'static,
{
    if let Some(blocked) = guard_showing_access(&routes.policy, &headers) {
        return blocked;
    }

    match routes.service.request_showing(request) {
        Ok(outcome) => {
            let view = ShowingOutcomeView::from(&outcome);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R>(State(routes): State<ShowingRoutes<R>>) -> Response
where
    R: ShowingRepository + 'static,
{
    match routes.service.list() {
        Ok(showings) => {
            let views: Vec<ShowingView> = showings.iter().map(ShowingView::from).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn detail_handler<R>(
    State(routes): State<ShowingRoutes<R>>,
    Path(showing_id): Path<String>,
) -> Response
where
    R: ShowingRepository + 'static,
{
    let id = ShowingId(showing_id);
    match routes.service.get(&id) {
        Ok(showing) => {
            let view = ShowingView::from(&showing);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    pub(crate) status: ShowingStatus,
    #[serde(default)]
    pub(crate) notes: Option<String>,
}

pub(crate) async fn status_handler<R>(
    State(routes): State<ShowingRoutes<R>>,
    Path(showing_id): Path<String>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<StatusUpdateRequest>,
) -> Response
where
    R: ShowingRepository + 'static,
{
    if let Some(blocked) = guard_showing_access(&routes.policy, &headers) {
        return blocked;
    }

    let id = ShowingId(showing_id);
    match routes
        .service
        .update_status(&id, request.status, request.notes)
    {
        Ok(outcome) => {
            let view = ShowingOutcomeView::from(&outcome);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RescheduleRequest {
    pub(crate) new_date: NaiveDate,
    pub(crate) new_time: NaiveTime,
}

pub(crate) async fn reschedule_handler<R>(
    State(routes): State<ShowingRoutes<R>>,
    Path(showing_id): Path<String>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<RescheduleRequest>,
) -> Response
where
    R: ShowingRepository + 'static,
{
    if let Some(blocked) = guard_showing_access(&routes.policy, &headers) {
        return blocked;
    }

    let id = ShowingId(showing_id);
    match routes
        .service
        .reschedule(&id, request.new_date, request.new_time)
    {
        Ok(outcome) => {
            let view = ShowingOutcomeView::from(&outcome);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: ShowingError) -> Response {
    let (status, payload) = match &err {
        ShowingError::Validation(validation) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": validation.to_string() }),
        ),
        ShowingError::InvalidTransition { from, to } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "error": err.to_string(),
                "from": from.label(),
                "to": to.label(),
            }),
        ),
        ShowingError::Repository(RepositoryError::NotFound) => (
            StatusCode::NOT_FOUND,
            json!({ "error": "showing not found" }),
        ),
        ShowingError::Repository(RepositoryError::Conflict) => (
            StatusCode::CONFLICT,
            json!({ "error": "showing already exists" }),
        ),
        ShowingError::Repository(RepositoryError::Unavailable(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": err.to_string() }),
        ),
    };
    (status, axum::Json(payload)).into_response()
}
