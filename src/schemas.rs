use common::{
    BatchCustomerInput, BatchPriceReply, CustomerInput, PriceReply, PriceResult, ReplyStatus,
    SelfTestReply,
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::upstream::PricingUpstream;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Client for the external pricing service
    pub upstream: PricingUpstream,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Gateway status
    pub status: String,
    /// Gateway version
    pub version: String,
    /// Pricing service reachability (`reachable` or `unreachable`)
    pub upstream: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::pricing::calculate_price,
        crate::handlers::pricing::calculate_batch_prices,
        crate::handlers::pricing::test_model,
    ),
    components(
        schemas(
            HealthResponse,
            CustomerInput,
            BatchCustomerInput,
            PriceResult,
            ReplyStatus,
            PriceReply,
            BatchPriceReply,
            SelfTestReply,
        )
    ),
    tags(
        (name = "health", description = "Gateway and pricing service status"),
        (name = "pricing", description = "Price calculation relayed to the pricing service"),
    ),
    info(
        title = "Pricing Console API",
        version = "0.1.0",
        description = "Gateway serving the pricing form and relaying the dynamic pricing API",
    )
)]
pub struct ApiDoc;
