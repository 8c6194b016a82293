//! Common transport-layer types shared between the gateway and the frontend.
//! These structs mirror the pricing service's request/response payloads so
//! both sides decode replies without duplicating shapes.

mod customer;
mod pricing;
mod reply;

pub use customer::{coerce_number, format_field_value, CustomerField, CustomerInput};
pub use pricing::{format_amount, BatchCustomerInput, PriceField, PriceResult};
pub use reply::{
    decode_reply, error_from_body, BatchPriceReply, PriceReply, PricingError, Reply, ReplyStatus,
    SelfTestReply, SelfTestReport,
};

/// Relative path of the single-customer pricing endpoint.
pub const CALCULATE_PRICE_PATH: &str = "/api/calculate_price/";
/// Relative path of the batch pricing endpoint.
pub const CALCULATE_BATCH_PATH: &str = "/api/calculate_batch_prices/";
/// Relative path of the canned model self-test.
pub const TEST_MODEL_PATH: &str = "/api/test_model/";
/// Relative path of the health probe.
pub const HEALTH_PATH: &str = "/health";
