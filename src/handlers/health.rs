use axum::{extract::State, response::Json};
use tracing::{debug, instrument};
use crate::schemas::{AppState, HealthResponse};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Gateway is up; reports pricing service reachability", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Probe the pricing service
    let upstream_status = if state.upstream.is_reachable().await {
        "reachable".to_string()
    } else {
        "unreachable".to_string()
    };
    debug!("Pricing service at {} is {}", state.upstream.base_url(), upstream_status);

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: upstream_status,
    })
}
