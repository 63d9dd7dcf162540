use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use renthub::access::{
    Permission, PermissionPolicy, Role, RouteGate, RouteGateOutcome, UserSnapshot,
};
use renthub::directory::{TenantProfile, TenantQuery};
use renthub::workflows::invitations::{
    invitation_router, InvitationRepository, InvitationService, InviteNotifier,
};
use renthub::workflows::showings::{showing_router, ShowingRepository, ShowingService};
use serde_json::json;

use crate::infra::AppState;

const DIRECTORY_PATH: &str = "/api/v1/directory/tenants";

/// State behind the tenant-directory screen: the stand-in dataset plus the
/// access policy its route gate consults.
#[derive(Clone)]
pub(crate) struct DirectoryRoutes {
    pub(crate) tenants: Arc<Vec<TenantProfile>>,
    pub(crate) policy: Arc<PermissionPolicy>,
}

/// Compose the full application router: workflow surfaces, the gated
/// directory screen, and the operational endpoints.
pub(crate) fn app_router<R, N, S>(
    invitations: Arc<InvitationService<R, N>>,
    showings: Arc<ShowingService<S>>,
    directory: DirectoryRoutes,
    policy: Arc<PermissionPolicy>,
) -> Router
where
    R: InvitationRepository + 'static,
    N: InviteNotifier + 'static,
    S: ShowingRepository + 'static,
{
    Router::new()
        .merge(invitation_router(invitations, policy.clone()))
        .merge(showing_router(showings, policy))
        .merge(directory_router(directory))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) fn directory_router(state: DirectoryRoutes) -> Router {
    Router::new()
        .route(DIRECTORY_PATH, get(directory_handler))
        .with_state(state)
}

/// The directory is a routed screen: the gate's four checks run in order and
/// the first failure decides the response.
pub(crate) async fn directory_handler(
    State(routes): State<DirectoryRoutes>,
    headers: HeaderMap,
    Query(query): Query<TenantQuery>,
) -> Response {
    let snapshot = UserSnapshot::from_headers(&headers);
    let gate = RouteGate::new("/login")
        .allow_roles(&[Role::Agent, Role::Landlord, Role::Admin])
        .require_permission(Permission::ViewTenantDirectory);

    match gate.evaluate(&routes.policy, snapshot.as_ref(), DIRECTORY_PATH) {
        RouteGateOutcome::Loading => {
            let payload = json!({ "status": "loading" });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
        RouteGateOutcome::Redirect {
            to,
            preserve_target,
        } => {
            // The target rides along as a query value, so it must be encoded
            // before composing the Location header.
            let next: String = form_urlencoded::byte_serialize(preserve_target.as_bytes()).collect();
            let location = format!("{to}?next={next}");
            (
                StatusCode::TEMPORARY_REDIRECT,
                [(header::LOCATION, location)],
            )
                .into_response()
        }
        RouteGateOutcome::PermissionDenied { permission } => {
            let payload = json!({
                "error": "you do not have access to the tenant directory",
                "permission": permission.label(),
            });
            (StatusCode::FORBIDDEN, Json(payload)).into_response()
        }
        RouteGateOutcome::VerificationRequired => {
            let payload = json!({
                "error": "verify your account to continue",
            });
            (StatusCode::FORBIDDEN, Json(payload)).into_response()
        }
        RouteGateOutcome::Allow => {
            let matches = query.apply(&routes.tenants);
            (StatusCode::OK, Json(matches)).into_response()
        }
    }
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
