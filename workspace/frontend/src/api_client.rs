use common::{
    decode_reply, CustomerInput, PriceReply, PriceResult, PricingError, Reply, SelfTestReply,
    SelfTestReport, CALCULATE_PRICE_PATH, TEST_MODEL_PATH,
};
use gloo_net::http::{Request, Response};
use serde::Serialize;

use crate::settings;

/// The remote pricing endpoints the form talks to.
#[allow(async_fn_in_trait)]
pub trait PricingService {
    async fn calculate_price(&self, input: &CustomerInput) -> Result<PriceResult, PricingError>;

    async fn test_model(&self) -> Result<SelfTestReport, PricingError>;
}

/// [`PricingService`] over `fetch`, rooted at the configured API origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpPricingService;

impl PricingService for HttpPricingService {
    async fn calculate_price(&self, input: &CustomerInput) -> Result<PriceResult, PricingError> {
        post::<PriceReply, _>(CALCULATE_PRICE_PATH, input).await
    }

    async fn test_model(&self) -> Result<SelfTestReport, PricingError> {
        get::<SelfTestReply>(TEST_MODEL_PATH).await
    }
}

fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

/// Common GET request handler
pub async fn get<R: Reply>(endpoint: &str) -> Result<R::Payload, PricingError> {
    let url = api_url(endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        log::error!("GET {} - Request failed: {}", endpoint, e);
        PricingError::Transport(e.to_string())
    })?;

    decode::<R>("GET", endpoint, response).await
}

/// Common POST request handler
pub async fn post<R, B>(endpoint: &str, body: &B) -> Result<R::Payload, PricingError>
where
    R: Reply,
    B: Serialize,
{
    let url = api_url(endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| {
            log::error!("POST {} - Failed to serialize request: {}", endpoint, e);
            PricingError::Transport(e.to_string())
        })?
        .send()
        .await
        .map_err(|e| {
            log::error!("POST {} - Request failed: {}", endpoint, e);
            PricingError::Transport(e.to_string())
        })?;

    decode::<R>("POST", endpoint, response).await
}

async fn decode<R: Reply>(
    method: &str,
    endpoint: &str,
    response: Response,
) -> Result<R::Payload, PricingError> {
    let status = response.status();
    if !response.ok() {
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, status);
    }

    log::trace!("{} {} - Response received, reading body", method, endpoint);
    let body = response.text().await.map_err(|e| {
        log::error!("{} {} - Failed to read body: {}", method, endpoint, e);
        PricingError::Transport(e.to_string())
    })?;

    let result = decode_reply::<R>(status, &body);
    match &result {
        Ok(_) => log::info!("{} {} - Success", method, endpoint),
        Err(e) => log::error!("{} {} - {}", method, endpoint, e),
    }
    result
}
