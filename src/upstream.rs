use axum::http::StatusCode;
use common::{
    decode_reply, BatchCustomerInput, BatchPriceReply, CustomerInput, PriceReply, PriceResult,
    PricingError, Reply, SelfTestReply, SelfTestReport, CALCULATE_BATCH_PATH,
    CALCULATE_PRICE_PATH, HEALTH_PATH, TEST_MODEL_PATH,
};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Failure of a relayed call to the pricing service
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The service could not be reached or the reply could not be read
    #[error("Pricing service unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
    /// The service answered, but not with a usable result
    #[error("{error}")]
    Rejected { status: StatusCode, error: PricingError },
}

impl UpstreamError {
    /// Status code the gateway answers with for this failure.
    ///
    /// Upstream 4xx/5xx statuses pass through. An error envelope on a 2xx
    /// reply becomes 400, an undecodable reply 502.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Unreachable(_) => StatusCode::BAD_GATEWAY,
            UpstreamError::Rejected { status, .. }
                if status.is_client_error() || status.is_server_error() =>
            {
                *status
            }
            UpstreamError::Rejected { error: PricingError::Service(_), .. } => {
                StatusCode::BAD_REQUEST
            }
            UpstreamError::Rejected { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

/// HTTP client for the external pricing service
#[derive(Clone, Debug)]
pub struct PricingUpstream {
    client: reqwest::Client,
    base_url: String,
}

impl PricingUpstream {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        reqwest::Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid upstream URL '{}': {}", base_url, e))?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self, input))]
    pub async fn calculate_price(&self, input: &CustomerInput) -> Result<PriceResult, UpstreamError> {
        let url = self.endpoint(CALCULATE_PRICE_PATH);
        debug!("Relaying price calculation to {}", url);
        let response = self.client.post(&url).json(input).send().await?;
        Self::decode::<PriceReply>(response).await
    }

    #[instrument(skip(self, batch), fields(customers = batch.customers.len()))]
    pub async fn calculate_batch(
        &self,
        batch: &BatchCustomerInput,
    ) -> Result<Vec<PriceResult>, UpstreamError> {
        let url = self.endpoint(CALCULATE_BATCH_PATH);
        debug!("Relaying batch price calculation to {}", url);
        let response = self.client.post(&url).json(batch).send().await?;
        Self::decode::<BatchPriceReply>(response).await
    }

    #[instrument(skip(self))]
    pub async fn test_model(&self) -> Result<SelfTestReport, UpstreamError> {
        let url = self.endpoint(TEST_MODEL_PATH);
        debug!("Requesting model self-test from {}", url);
        let response = self.client.get(&url).send().await?;
        Self::decode::<SelfTestReply>(response).await
    }

    /// Whether the service answers its health endpoint with a 2xx status.
    pub async fn is_reachable(&self) -> bool {
        match self.client.get(self.endpoint(HEALTH_PATH)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Pricing service health probe failed: {}", e);
                false
            }
        }
    }

    async fn decode<R: Reply>(response: reqwest::Response) -> Result<R::Payload, UpstreamError> {
        let status = response.status();
        let body = response.text().await?;
        debug!("Pricing service answered {} ({} bytes)", status, body.len());

        decode_reply::<R>(status.as_u16(), &body).map_err(|error| {
            warn!("Pricing service rejected the request ({}): {}", status, error);
            UpstreamError::Rejected { status, error }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(status: StatusCode, error: PricingError) -> UpstreamError {
        UpstreamError::Rejected { status, error }
    }

    #[test]
    fn test_error_envelope_on_success_status_maps_to_bad_request() {
        let err = rejected(StatusCode::OK, PricingError::Service("Invalid input".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid input");
    }

    #[test]
    fn test_upstream_error_status_passes_through() {
        let err = rejected(
            StatusCode::UNPROCESSABLE_ENTITY,
            PricingError::Service("field required".to_string()),
        );
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = rejected(StatusCode::SERVICE_UNAVAILABLE, PricingError::Http { status: 503 });
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "HTTP error: 503");
    }

    #[test]
    fn test_undecodable_success_maps_to_bad_gateway() {
        let err = rejected(StatusCode::OK, PricingError::Decode("expected value".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_base_url_is_validated_and_normalized() {
        assert!(PricingUpstream::new("not a url", Duration::from_secs(1)).is_err());

        let upstream = PricingUpstream::new("http://pricing:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(upstream.base_url(), "http://pricing:8000");
        assert_eq!(
            upstream.endpoint(CALCULATE_PRICE_PATH),
            "http://pricing:8000/api/calculate_price/"
        );
    }
}
