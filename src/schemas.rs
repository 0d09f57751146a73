use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::controller::{DashboardController, DashboardInputs, DashboardStatus, DashboardView};
use crate::report::{AggregatedReport, QualityEvaluation, ReportFetcher};

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<DashboardController>,
    /// Report API the dashboard reads from, also probed by `/health`
    pub upstream: Arc<dyn ReportFetcher>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

/// Load trigger, from the HTML form or as JSON
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoadRequest {
    /// Window start (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Window end, inclusive (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Top products limit, defaults to 12
    pub limit: Option<String>,
    /// Data-quality mismatch tolerance, defaults to 0.05
    pub tol: Option<String>,
}

impl From<LoadRequest> for DashboardInputs {
    fn from(request: LoadRequest) -> Self {
        Self {
            start_date: request.start_date.unwrap_or_default(),
            end_date: request.end_date.unwrap_or_default(),
            limit: request.limit.unwrap_or_default(),
            tol: request.tol.unwrap_or_default(),
        }
    }
}

/// Current dashboard state
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSnapshot {
    /// One of idle, loading, loaded, error
    pub state: String,
    /// Status line text
    pub status_text: String,
    /// Whether a new load can be triggered
    pub trigger_enabled: bool,
    pub inputs: DashboardInputs,
    /// Last successful load
    #[schema(value_type = Option<Object>)]
    pub report: Option<AggregatedReport>,
    /// Data-quality verdict of the last successful load
    #[schema(value_type = Option<Object>)]
    pub quality: Option<QualityEvaluation>,
}

impl From<DashboardView> for DashboardSnapshot {
    fn from(view: DashboardView) -> Self {
        let state = match view.status {
            DashboardStatus::Idle => "idle",
            DashboardStatus::Loading => "loading",
            DashboardStatus::Loaded => "loaded",
            DashboardStatus::Error(_) => "error",
        };
        Self {
            state: state.to_string(),
            status_text: view.status.text().to_string(),
            trigger_enabled: view.status.trigger_enabled(),
            inputs: view.inputs,
            report: view.report,
            quality: view.quality,
        }
    }
}

/// Load accepted and running in the background
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoadAccepted {
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `connected` when the report API answers its health check
    pub upstream: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::dashboard::trigger_load,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            LoadRequest,
            LoadAccepted,
            DashboardSnapshot,
            DashboardInputs,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Sales dashboard state and load trigger"),
    ),
    info(
        title = "SalesOps Dashboard API",
        description = "Weekly sales, shipping and data-quality dashboard over the report API",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
