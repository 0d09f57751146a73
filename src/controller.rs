//! Dashboard state machine.
//!
//! `Idle -> Loading -> {Loaded | Error}`. The controller owns the operator's
//! inputs, the current [`DashboardStatus`] and the last successfully loaded
//! report. A trigger is refused while a load is in flight, which is the
//! server-side equivalent of the disabled Load button.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use crate::report::quality::{self, QualityEvaluation};
use crate::report::query::{DEFAULT_LIMIT, DEFAULT_TOLERANCE};
use crate::report::{AggregatedReport, ReportError, ReportOrchestrator, ReportQuery, build_query};

/// Status line shown when a load is triggered without both dates.
pub const MISSING_DATES_MESSAGE: &str = "Please select start_date and end_date.";

/// UI state of the dashboard, reset on every load attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum DashboardStatus {
    Idle,
    Loading,
    Loaded,
    Error(String),
}

impl DashboardStatus {
    /// Text for the status line.
    pub fn text(&self) -> &str {
        match self {
            DashboardStatus::Idle => "",
            DashboardStatus::Loading => "Loading...",
            DashboardStatus::Loaded => "Loaded.",
            DashboardStatus::Error(message) => message,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardStatus::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DashboardStatus::Error(_))
    }

    /// Whether the Load trigger is enabled.
    pub fn trigger_enabled(&self) -> bool {
        !self.is_loading()
    }
}

/// Raw values of the dashboard inputs, exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardInputs {
    /// Window start (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: String,
    /// Window end, inclusive (YYYY-MM-DD)
    #[serde(default)]
    pub end_date: String,
    /// Top products limit
    #[serde(default)]
    pub limit: String,
    /// Data-quality mismatch tolerance
    #[serde(default)]
    pub tol: String,
}

impl DashboardInputs {
    /// The `days`-long window ending `today` (inclusive), with default limit and tolerance.
    pub fn default_window(today: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.max(1)) - 1;
        let start = today - Duration::days(span);
        Self {
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: today.format("%Y-%m-%d").to_string(),
            limit: DEFAULT_LIMIT.to_string(),
            tol: DEFAULT_TOLERANCE.to_string(),
        }
    }

    pub fn to_query(&self) -> Result<ReportQuery, ReportError> {
        build_query(
            Some(&self.start_date),
            Some(&self.end_date),
            Some(&self.limit),
            Some(&self.tol),
        )
    }
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub status: DashboardStatus,
    pub inputs: DashboardInputs,
    /// Last successful load; a failed load leaves it untouched
    pub report: Option<AggregatedReport>,
    pub quality: Option<QualityEvaluation>,
}

/// Why a load trigger was refused.
#[derive(Debug, Error, PartialEq)]
pub enum TriggerError {
    #[error("A load is already in progress")]
    AlreadyLoading,

    #[error("{}", .0.display_message())]
    Invalid(ReportError),
}

#[derive(Debug)]
pub struct DashboardController {
    orchestrator: ReportOrchestrator,
    view: RwLock<DashboardView>,
}

impl DashboardController {
    /// A controller in `Idle` with `inputs` pre-filled.
    pub fn new(orchestrator: ReportOrchestrator, inputs: DashboardInputs) -> Self {
        Self {
            orchestrator,
            view: RwLock::new(DashboardView {
                status: DashboardStatus::Idle,
                inputs,
                report: None,
                quality: None,
            }),
        }
    }

    pub async fn snapshot(&self) -> DashboardView {
        self.view.read().await.clone()
    }

    pub async fn status(&self) -> DashboardStatus {
        self.view.read().await.status.clone()
    }

    /// Accept a trigger: record the inputs, validate them and enter `Loading`.
    ///
    /// Missing dates move the dashboard to `Error` without touching the network.
    #[instrument(skip(self))]
    pub async fn begin_load(&self, inputs: DashboardInputs) -> Result<ReportQuery, TriggerError> {
        let mut view = self.view.write().await;
        if view.status.is_loading() {
            warn!("Load triggered while another load is running, ignoring");
            return Err(TriggerError::AlreadyLoading);
        }

        let query = inputs.to_query();
        view.inputs = inputs;

        match query {
            Ok(query) => {
                debug!("Dashboard entering Loading");
                view.status = DashboardStatus::Loading;
                Ok(query)
            }
            Err(e) => {
                info!(error = %e, "Load rejected before any request");
                view.status = DashboardStatus::Error(MISSING_DATES_MESSAGE.to_string());
                Err(TriggerError::Invalid(e))
            }
        }
    }

    /// Run the load for an accepted trigger and settle the status.
    #[instrument(skip(self, query))]
    pub async fn finish_load(&self, query: &ReportQuery) -> DashboardStatus {
        let result = self.orchestrator.load(query).await;

        let mut view = self.view.write().await;
        let status = match result {
            Ok(report) => {
                view.quality = Some(quality::evaluate(&report.data_quality));
                view.report = Some(report);
                info!("Dashboard loaded");
                DashboardStatus::Loaded
            }
            Err(e) => {
                error!(error = %e, "Dashboard load failed");
                DashboardStatus::Error(e.display_message())
            }
        };
        view.status = status.clone();
        status
    }

    /// Trigger and wait for a full load.
    pub async fn load(&self, inputs: DashboardInputs) -> Result<DashboardStatus, TriggerError> {
        let query = self.begin_load(inputs).await?;
        Ok(self.finish_load(&query).await)
    }

    /// Trigger a load and run it on a background task.
    pub async fn spawn_load(
        self: &Arc<Self>,
        inputs: DashboardInputs,
    ) -> Result<JoinHandle<DashboardStatus>, TriggerError> {
        let query = self.begin_load(inputs).await?;
        let controller = Arc::clone(self);
        Ok(tokio::spawn(async move { controller.finish_load(&query).await }))
    }
}
