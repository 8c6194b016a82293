use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::pricing::PriceResult;

/// Outcome flag carried by every pricing reply.
///
/// The service has been seen answering `"success"` as well as `"ok"`; both
/// read as [`ReplyStatus::Ok`] and are written back as `"ok"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    #[serde(alias = "success")]
    Ok,
    Error,
}

/// Errors surfaced to the user when a pricing call fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The service answered and reported a logical error.
    #[error("{0}")]
    Service(String),
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("HTTP error: {status}")]
    Http { status: u16 },
}

/// A decoded reply envelope that either carries a payload or an error message.
pub trait Reply: DeserializeOwned {
    type Payload;

    fn status(&self) -> ReplyStatus;

    fn message(&self) -> Option<&str>;

    /// Extract the payload of an `ok` reply.
    fn take_payload(self) -> Option<Self::Payload>;

    fn into_payload(self) -> Result<Self::Payload, PricingError> {
        match self.status() {
            ReplyStatus::Error => Err(PricingError::Service(
                self.message().unwrap_or("Unknown error").to_string(),
            )),
            ReplyStatus::Ok => self
                .take_payload()
                .ok_or_else(|| PricingError::Decode("reply carries no result".to_string())),
        }
    }
}

/// Reply of `POST /api/calculate_price/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceReply {
    pub status: ReplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PriceResult>,
}

impl PriceReply {
    pub fn ok(data: PriceResult) -> Self {
        Self { status: ReplyStatus::Ok, message: None, data: Some(data) }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { status: ReplyStatus::Error, message: Some(message.into()), data: None }
    }
}

impl Reply for PriceReply {
    type Payload = PriceResult;

    fn status(&self) -> ReplyStatus {
        self.status
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn take_payload(self) -> Option<PriceResult> {
        self.data
    }
}

/// Reply of `POST /api/calculate_batch_prices/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BatchPriceReply {
    pub status: ReplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<PriceResult>>,
}

impl BatchPriceReply {
    pub fn ok(data: Vec<PriceResult>) -> Self {
        Self { status: ReplyStatus::Ok, message: None, data: Some(data) }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { status: ReplyStatus::Error, message: Some(message.into()), data: None }
    }
}

impl Reply for BatchPriceReply {
    type Payload = Vec<PriceResult>;

    fn status(&self) -> ReplyStatus {
        self.status
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn take_payload(self) -> Option<Vec<PriceResult>> {
        self.data
    }
}

/// Canned scenario returned by the model self-test.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfTestReport {
    pub message: Option<String>,
    /// Sample input keyed by field wire name.
    pub test_input: BTreeMap<String, f64>,
    pub test_result: PriceResult,
}

/// Reply of `GET /api/test_model/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SelfTestReply {
    pub status: ReplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_input: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_result: Option<PriceResult>,
}

impl SelfTestReply {
    pub fn ok(report: SelfTestReport) -> Self {
        Self {
            status: ReplyStatus::Ok,
            message: report.message,
            test_input: Some(report.test_input),
            test_result: Some(report.test_result),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Error,
            message: Some(message.into()),
            test_input: None,
            test_result: None,
        }
    }
}

impl Reply for SelfTestReply {
    type Payload = SelfTestReport;

    fn status(&self) -> ReplyStatus {
        self.status
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn take_payload(self) -> Option<SelfTestReport> {
        let test_result = self.test_result?;
        Some(SelfTestReport {
            message: self.message,
            test_input: self.test_input.unwrap_or_default(),
            test_result,
        })
    }
}

/// Error body of a non-2xx reply: either our envelope or a FastAPI `detail`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Decode a raw HTTP reply into its payload.
///
/// A 2xx body must parse as `R`; its `status` then decides between payload
/// and [`PricingError::Service`]. Any other status is turned into an error by
/// [`error_from_body`].
pub fn decode_reply<R: Reply>(status: u16, body: &str) -> Result<R::Payload, PricingError> {
    if !(200..300).contains(&status) {
        return Err(error_from_body(status, body));
    }

    let reply: R = serde_json::from_str(body).map_err(|e| {
        tracing::debug!("Undecodable reply body: {}", e);
        PricingError::Decode(e.to_string())
    })?;
    reply.into_payload()
}

/// Extract the service's message from a non-2xx body, if it carries one.
pub fn error_from_body(status: u16, body: &str) -> PricingError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(message), .. }) => PricingError::Service(message),
        Ok(ErrorBody { detail: Some(serde_json::Value::String(detail)), .. }) => {
            PricingError::Service(detail)
        }
        Ok(ErrorBody { detail: Some(detail), .. }) => PricingError::Service(detail.to_string()),
        _ => PricingError::Http { status },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULT_JSON: &str = r#"{"base_price":100.0,"dynamic_price":94.4,"clv":230.0,
        "price_adjustment_factor":0.94,"min_price":55.0,"profit_margin":47.03}"#;

    #[test]
    fn ok_reply_yields_payload() {
        let body = format!(r#"{{"status":"ok","data":{}}}"#, RESULT_JSON);
        let result = decode_reply::<PriceReply>(200, &body).unwrap();
        assert_eq!(result.dynamic_price, 94.4);
    }

    #[test]
    fn success_status_is_accepted() {
        let body = format!(r#"{{"status":"success","data":{}}}"#, RESULT_JSON);
        let result = decode_reply::<PriceReply>(200, &body).unwrap();
        assert_eq!(result.min_price, 55.0);
    }

    #[test]
    fn error_reply_surfaces_message_verbatim() {
        let body = r#"{"status":"error","message":"Invalid input"}"#;
        let err = decode_reply::<PriceReply>(200, body).unwrap_err();
        assert_eq!(err, PricingError::Service("Invalid input".to_string()));
        assert_eq!(err.to_string(), "Invalid input");
    }

    #[test]
    fn error_reply_without_message_is_unknown_error() {
        let err = decode_reply::<PriceReply>(200, r#"{"status":"error"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Unknown error");
    }

    #[test]
    fn ok_reply_without_data_is_decode_error() {
        let err = decode_reply::<PriceReply>(200, r#"{"status":"ok"}"#).unwrap_err();
        assert!(matches!(err, PricingError::Decode(_)));
    }

    #[test]
    fn non_json_success_body_is_decode_error() {
        let err = decode_reply::<PriceReply>(200, "<html>").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse response"));
    }

    #[test]
    fn fastapi_detail_is_used_on_error_status() {
        let body = r#"{"detail":"Price calculation error: CLV calculation error: boom"}"#;
        let err = decode_reply::<PriceReply>(400, body).unwrap_err();
        assert_eq!(
            err,
            PricingError::Service("Price calculation error: CLV calculation error: boom".to_string())
        );
    }

    #[test]
    fn envelope_message_is_used_on_error_status() {
        let body = r#"{"status":"error","message":"Endpoint not found"}"#;
        let err = decode_reply::<SelfTestReply>(404, body).unwrap_err();
        assert_eq!(err.to_string(), "Endpoint not found");
    }

    #[test]
    fn structured_detail_is_stringified() {
        let body = r#"{"detail":[{"loc":["body","Age"],"msg":"field required"}]}"#;
        let err = decode_reply::<PriceReply>(422, body).unwrap_err();
        match err {
            PricingError::Service(message) => assert!(message.contains("field required")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bare_error_status_reports_http_code() {
        let err = decode_reply::<PriceReply>(502, "Bad Gateway").unwrap_err();
        assert_eq!(err, PricingError::Http { status: 502 });
        assert_eq!(err.to_string(), "HTTP error: 502");
    }

    #[test]
    fn self_test_reply_yields_report() {
        let body = format!(
            r#"{{"status":"success","message":"Model working correctly",
                "test_result":{},
                "test_input":{{"Recency":30,"Frequency":5,"product_cost":50.0}}}}"#,
            RESULT_JSON
        );
        let report = decode_reply::<SelfTestReply>(200, &body).unwrap();
        assert_eq!(report.message.as_deref(), Some("Model working correctly"));
        assert_eq!(report.test_input.get("Recency"), Some(&30.0));
        assert_eq!(report.test_input.len(), 3);
        assert_eq!(report.test_result.price_adjustment_factor, 0.94);
    }

    #[test]
    fn constructed_replies_serialize_as_envelopes() {
        let json = serde_json::to_value(PriceReply::error("Invalid input")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "error", "message": "Invalid input"}));

        let json = serde_json::to_value(BatchPriceReply::ok(Vec::new())).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok", "data": []}));
    }
}
