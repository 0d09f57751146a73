use std::sync::Arc;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::{debug, info};

use crate::controller::{DashboardController, DashboardInputs};
use crate::report::{HttpReportClient, ReportFetcher, ReportOrchestrator};
use crate::schemas::AppState;

/// Optional settings file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard";
/// Prefix of the environment overrides, e.g. `DASHBOARD_API_BASE_URL`.
pub const ENV_PREFIX: &str = "DASHBOARD";

/// Dashboard settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DashboardSettings {
    /// Base URL of the report API
    pub api_base_url: String,
    /// Address the web service binds to
    pub bind_address: String,
    /// Length of the date window pre-filled on startup
    pub default_window_days: u32,
}

/// Load settings: built-in defaults, then `<file>.toml` if present, then `DASHBOARD_*` variables.
pub fn load_settings(file: Option<&str>) -> Result<DashboardSettings> {
    dotenvy::dotenv().ok();

    let file = file.unwrap_or(DEFAULT_CONFIG_FILE);
    debug!("Loading settings from {} and {}_* environment", file, ENV_PREFIX);

    let settings = Config::builder()
        .set_default("api_base_url", "http://127.0.0.1:8000")?
        .set_default("bind_address", "0.0.0.0:3000")?
        .set_default("default_window_days", 7)?
        .add_source(File::with_name(file).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .context("Failed to read dashboard settings")?
        .try_deserialize::<DashboardSettings>()
        .context("Invalid dashboard settings")?;

    debug!(?settings, "Settings loaded");
    Ok(settings)
}

/// Initialize application state against the configured report API
pub fn initialize_app_state(settings: &DashboardSettings) -> AppState {
    let client: Arc<dyn ReportFetcher> = Arc::new(HttpReportClient::new(&settings.api_base_url));
    info!("Using report API at {}", settings.api_base_url);
    initialize_app_state_with_fetcher(client, settings.default_window_days)
}

/// Initialize application state around any report fetcher
pub fn initialize_app_state_with_fetcher(upstream: Arc<dyn ReportFetcher>, window_days: u32) -> AppState {
    let today = chrono::Utc::now().date_naive();
    let inputs = DashboardInputs::default_window(today, window_days);
    debug!("Default window {} .. {}", inputs.start_date, inputs.end_date);

    let controller = DashboardController::new(ReportOrchestrator::new(upstream.clone()), inputs);

    AppState {
        controller: Arc::new(controller),
        upstream,
    }
}
