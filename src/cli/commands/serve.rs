use anyhow::Result;
use std::path::Path;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace, warn};

use crate::config::GatewayConfig;
use crate::router::create_router;
use crate::schemas::AppState;
use crate::upstream::PricingUpstream;

pub async fn serve(config: GatewayConfig) -> Result<()> {
    trace!("Entering serve function");
    info!("Pricing console starting up");
    debug!("Configuration: {:?}", config);

    // Initialize application state
    trace!("Creating pricing service client");
    let upstream = match PricingUpstream::new(&config.upstream_url, config.request_timeout()) {
        Ok(upstream) => {
            debug!("Pricing service client created for {}", upstream.base_url());
            upstream
        }
        Err(e) => {
            error!("Failed to create pricing service client: {}", e);
            return Err(e);
        }
    };

    if upstream.is_reachable().await {
        info!("Pricing service reachable at {}", config.upstream_url);
    } else {
        warn!("Pricing service at {} is not reachable yet; requests will fail until it is", config.upstream_url);
    }

    let static_dir = Path::new(&config.static_dir);
    if !static_dir.join("index.html").exists() {
        warn!("No index.html in {}; build the frontend with `trunk build`", static_dir.display());
    }

    // Create router
    trace!("Creating application router");
    let app = create_router(AppState { upstream }, static_dir, config.request_timeout());
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", config.bind_address);
    let listener = match TcpListener::bind(&config.bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", config.bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", config.bind_address, e);
            return Err(e.into());
        }
    };

    info!("Pricing console running on http://{}", config.bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", config.bind_address);

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
