use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use tracing::{debug, info, instrument, trace, warn};

use crate::controller::TriggerError;
use crate::helpers::page::render_page;
use crate::schemas::{AppState, DashboardSnapshot, ErrorResponse, LoadAccepted, LoadRequest};

/// Dashboard HTML page
#[instrument(skip(state))]
pub async fn dashboard_page(State(state): State<AppState>) -> Html<String> {
    trace!("Rendering dashboard page");
    let view = state.controller.snapshot().await;
    Html(render_page(&view))
}

/// Form submission of the Load button
#[instrument(skip(state))]
pub async fn submit_load(State(state): State<AppState>, Form(request): Form<LoadRequest>) -> Response {
    match state.controller.spawn_load(request.into()).await {
        Ok(_) => {
            info!("Dashboard load started from form");
            Redirect::to("/").into_response()
        }
        // the page shows the validation message
        Err(TriggerError::Invalid(_)) => Redirect::to("/").into_response(),
        Err(TriggerError::AlreadyLoading) => {
            let view = state.controller.snapshot().await;
            (StatusCode::CONFLICT, Html(render_page(&view))).into_response()
        }
    }
}

/// Get the current dashboard state
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard state retrieved successfully", body = DashboardSnapshot),
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    let view = state.controller.snapshot().await;
    debug!("Dashboard status: {:?}", view.status);
    Json(DashboardSnapshot::from(view))
}

/// Trigger a dashboard load
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/load",
    tag = "dashboard",
    request_body = LoadRequest,
    responses(
        (status = 202, description = "Load started", body = LoadAccepted),
        (status = 400, description = "Missing date bounds", body = ErrorResponse),
        (status = 409, description = "A load is already running", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn trigger_load(
    State(state): State<AppState>,
    Json(request): Json<LoadRequest>,
) -> Result<(StatusCode, Json<LoadAccepted>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering trigger_load function");

    match state.controller.spawn_load(request.into()).await {
        Ok(_) => {
            info!("Dashboard load started");
            let response = LoadAccepted {
                message: "Load started".to_string(),
                success: true,
            };
            Ok((StatusCode::ACCEPTED, Json(response)))
        }
        Err(TriggerError::Invalid(e)) => {
            warn!("Rejected load request: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.display_message(), e.code())),
            ))
        }
        Err(e @ TriggerError::AlreadyLoading) => {
            warn!("Rejected load request: {}", e);
            Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(e.to_string(), "ALREADY_LOADING")),
            ))
        }
    }
}
