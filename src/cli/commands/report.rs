use anyhow::{Context, Result, bail};
use tracing::{debug, info, trace, warn};

use crate::config::{initialize_app_state, load_settings};
use crate::controller::{DashboardStatus, DashboardView};
use crate::helpers::{digest::weekly_digest, page::render_page};

/// Flags of the `report` command; unset values keep the startup defaults.
#[derive(Debug, Default)]
pub struct ReportOptions {
    pub api_base_url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<String>,
    pub tol: Option<String>,
    pub output: Option<String>,
}

pub async fn report(config: Option<&str>, options: ReportOptions) -> Result<()> {
    trace!("Entering report function");

    let mut settings = load_settings(config)?;
    if let Some(url) = options.api_base_url {
        settings.api_base_url = url;
    }
    let state = initialize_app_state(&settings);

    let mut inputs = state.controller.snapshot().await.inputs;
    if let Some(start) = options.start_date {
        inputs.start_date = start;
    }
    if let Some(end) = options.end_date {
        inputs.end_date = end;
    }
    if let Some(limit) = options.limit {
        inputs.limit = limit;
    }
    if let Some(tol) = options.tol {
        inputs.tol = tol;
    }
    debug!(?inputs, "Loading report");

    match state.controller.load(inputs).await {
        Ok(status) => debug!("Report load settled: {:?}", status),
        // the controller is already in Error and the status line says why
        Err(e) => warn!("Report load not started: {}", e),
    }
    let view = state.controller.snapshot().await;

    println!("{}", summary(&view));

    if let Some(path) = options.output {
        std::fs::write(&path, render_page(&view))
            .with_context(|| format!("Failed to write dashboard to {}", path))?;
        info!("Dashboard written to {}", path);
    }

    if let DashboardStatus::Error(message) = &view.status {
        bail!("Report load failed: {}", message);
    }
    Ok(())
}

/// Status line, then the weekly digest with its data-quality line once loaded.
fn summary(view: &DashboardView) -> String {
    let mut out = format!("Status: {}\n", view.status.text());

    if let (DashboardStatus::Loaded, Some(report)) = (&view.status, &view.report) {
        out.push('\n');
        out.push_str(&weekly_digest(report, view.quality.as_ref()));
    }
    out
}
