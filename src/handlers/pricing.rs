use crate::schemas::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use common::{
    BatchCustomerInput, BatchPriceReply, CustomerInput, PriceReply, SelfTestReply,
};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::upstream::UpstreamError;

fn log_failure(operation: &str, err: &UpstreamError) {
    match err {
        UpstreamError::Unreachable(_) => error!("{} failed: {}", operation, err),
        UpstreamError::Rejected { status, .. } => {
            warn!("{} rejected by pricing service ({}): {}", operation, status, err)
        }
    }
}

/// Calculate the price for one customer
///
/// Fields are forwarded exactly as received; a field that could not be read
/// as a number arrives as `null` and is left for the pricing service to judge.
#[utoipa::path(
    post,
    path = "/api/calculate_price/",
    tag = "pricing",
    request_body = CustomerInput,
    responses(
        (status = 200, description = "Price calculated", body = PriceReply),
        (status = 400, description = "Pricing service reported an error", body = PriceReply),
        (status = 502, description = "Pricing service unreachable", body = PriceReply)
    )
)]
#[instrument(skip_all)]
pub async fn calculate_price(
    State(state): State<AppState>,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> (StatusCode, Json<PriceReply>) {
    trace!("Entering calculate_price function");
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!("Rejected price calculation body: {}", rejection.body_text());
            return (rejection.status(), Json(PriceReply::error(rejection.body_text())));
        }
    };
    debug!("Calculating price for {:?}", input);

    match state.upstream.calculate_price(&input).await {
        Ok(result) => {
            info!(
                "Price calculated: base {:.2}, dynamic {:.2}",
                result.base_price, result.dynamic_price
            );
            (StatusCode::OK, Json(PriceReply::ok(result)))
        }
        Err(err) => {
            log_failure("Price calculation", &err);
            (err.status_code(), Json(PriceReply::error(err.to_string())))
        }
    }
}

/// Calculate prices for several customers in one call
#[utoipa::path(
    post,
    path = "/api/calculate_batch_prices/",
    tag = "pricing",
    request_body = BatchCustomerInput,
    responses(
        (status = 200, description = "Prices calculated, in input order", body = BatchPriceReply),
        (status = 400, description = "Pricing service reported an error", body = BatchPriceReply),
        (status = 502, description = "Pricing service unreachable", body = BatchPriceReply)
    )
)]
#[instrument(skip_all)]
pub async fn calculate_batch_prices(
    State(state): State<AppState>,
    payload: Result<Json<BatchCustomerInput>, JsonRejection>,
) -> (StatusCode, Json<BatchPriceReply>) {
    trace!("Entering calculate_batch_prices function");
    let batch = match payload {
        Ok(Json(batch)) => batch,
        Err(rejection) => {
            warn!("Rejected batch calculation body: {}", rejection.body_text());
            return (rejection.status(), Json(BatchPriceReply::error(rejection.body_text())));
        }
    };
    debug!("Calculating prices for {} customers", batch.customers.len());

    match state.upstream.calculate_batch(&batch).await {
        Ok(results) => {
            info!("Batch priced: {} results", results.len());
            (StatusCode::OK, Json(BatchPriceReply::ok(results)))
        }
        Err(err) => {
            log_failure("Batch price calculation", &err);
            (err.status_code(), Json(BatchPriceReply::error(err.to_string())))
        }
    }
}

/// Run the pricing model against its canned scenario
#[utoipa::path(
    get,
    path = "/api/test_model/",
    tag = "pricing",
    responses(
        (status = 200, description = "Sample input and the price computed for it", body = SelfTestReply),
        (status = 400, description = "Pricing service reported an error", body = SelfTestReply),
        (status = 502, description = "Pricing service unreachable", body = SelfTestReply)
    )
)]
#[instrument(skip_all)]
pub async fn test_model(State(state): State<AppState>) -> (StatusCode, Json<SelfTestReply>) {
    trace!("Entering test_model function");

    match state.upstream.test_model().await {
        Ok(report) => {
            info!("Model self-test passed with {} sample fields", report.test_input.len());
            (StatusCode::OK, Json(SelfTestReply::ok(report)))
        }
        Err(err) => {
            log_failure("Model self-test", &err);
            (err.status_code(), Json(SelfTestReply::error(err.to_string())))
        }
    }
}
