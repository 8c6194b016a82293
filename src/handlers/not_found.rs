use axum::{http::StatusCode, http::Uri, response::Json};
use common::PriceReply;
use tracing::warn;

/// Unknown `/api` path; answered with an error envelope instead of the frontend page
pub async fn api_not_found(uri: Uri) -> (StatusCode, Json<PriceReply>) {
    warn!("No API endpoint at {}", uri.path());
    (StatusCode::NOT_FOUND, Json(PriceReply::error("Endpoint not found")))
}
