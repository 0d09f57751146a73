use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{initialize_app_state, load_settings};
use crate::router::create_router;

pub async fn serve(
    config: Option<&str>,
    api_base_url: Option<String>,
    bind_address: Option<String>,
) -> Result<()> {
    trace!("Entering serve function");
    info!("SalesOps dashboard starting up");

    let mut settings = load_settings(config)?;
    if let Some(url) = api_base_url {
        settings.api_base_url = url;
    }
    if let Some(address) = bind_address {
        settings.bind_address = address;
    }
    debug!("Report API: {}", settings.api_base_url);
    debug!("Bind address: {}", settings.bind_address);

    let state = initialize_app_state(&settings);
    let app = create_router(state);
    debug!("Router created successfully");

    info!("Starting server on {}", settings.bind_address);
    let listener = match TcpListener::bind(&settings.bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", settings.bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", settings.bind_address, e);
            return Err(e.into());
        }
    };

    info!("Dashboard running on http://{}", settings.bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", settings.bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
