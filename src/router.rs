use crate::handlers::{
    health::health_check,
    not_found::api_not_found,
    pricing::{calculate_batch_prices, calculate_price, test_model},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{any, get, post},
    Router,
};
use common::{CALCULATE_BATCH_PATH, CALCULATE_PRICE_PATH, HEALTH_PATH, TEST_MODEL_PATH};
use std::path::Path;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
///
/// Unknown paths under `/api` get a 404 error envelope; every other path not
/// matched by a route is served from `static_dir`, with `index.html` as the
/// fallback page.
pub fn create_router(state: AppState, static_dir: &Path, request_timeout: Duration) -> Router {
    let frontend = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    let router = Router::new()
        // Health check
        .route(HEALTH_PATH, get(health_check))
        // Pricing relay
        .route(CALCULATE_PRICE_PATH, post(calculate_price))
        .route(CALCULATE_BATCH_PATH, post(calculate_batch_prices))
        .route(TEST_MODEL_PATH, get(test_model))
        .route("/api", any(api_not_found))
        .route("/api/*rest", any(api_not_found))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Built frontend
        .fallback_service(frontend);

    // The Prometheus recorder is process-global, so it is only installed outside tests
    #[cfg(not(test))]
    let router = {
        let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();
        router
            .route("/metrics", get(move || std::future::ready(metric_handle.render())))
            .layer(prometheus_layer)
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
