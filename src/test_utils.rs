#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use crate::upstream::PricingUpstream;
    use axum::{
        extract::State,
        http::StatusCode,
        response::Json,
        routing::{get, post},
        Router,
    };
    use common::{CALCULATE_BATCH_PATH, CALCULATE_PRICE_PATH, HEALTH_PATH, TEST_MODEL_PATH};
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, Once};
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Title written into the fake frontend build.
    pub const TEST_PAGE_TITLE: &str = "Dynamic Pricing Engine";

    /// Request bodies received by the fake pricing service
    #[derive(Clone, Default)]
    pub struct RecordedRequests(Arc<Mutex<Vec<Value>>>);

    impl RecordedRequests {
        pub fn bodies(&self) -> Vec<Value> {
            self.0.lock().unwrap().clone()
        }

        fn record(&self, body: &Value) {
            self.0.lock().unwrap().push(body.clone());
        }
    }

    /// Deterministic stand-in for the pricing model, driven by product cost only.
    pub fn fake_price(customer: &Value) -> Value {
        let cost = customer["product_cost"].as_f64().unwrap_or(0.0);
        json!({
            "base_price": cost * 2.0,
            "dynamic_price": cost * 2.0 - 6.0,
            "min_price": cost + 5.0,
            "profit_margin": 47.37,
            "clv": 230.5,
            "price_adjustment_factor": 0.94
        })
    }

    pub fn sample_customer() -> Value {
        json!({
            "Recency": 15.0,
            "Frequency": 12.0,
            "MonetaryValue": 1200.0,
            "Tenure": 730.0,
            "AvgDaysBetweenPurchases": 25.0,
            "Age": 42.0,
            "UniqueProductsCount": 5.0,
            "product_cost": 50.0
        })
    }

    /// Mirrors the service's behaviour: FastAPI `detail` on 400, error
    /// envelope on 200 for logically invalid input, `success` otherwise.
    fn price_or_reject(customer: &Value) -> Result<Value, (StatusCode, Value)> {
        if customer["Age"].is_null() {
            return Err((
                StatusCode::BAD_REQUEST,
                json!({"detail": "Price calculation error: Age must be a number"}),
            ));
        }
        if customer["Recency"].as_f64().is_some_and(|recency| recency < 0.0) {
            return Err((StatusCode::OK, json!({"status": "error", "message": "Invalid input"})));
        }
        Ok(fake_price(customer))
    }

    async fn fake_calculate_price(
        State(recorded): State<RecordedRequests>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        recorded.record(&body);
        match price_or_reject(&body) {
            Ok(price) => (StatusCode::OK, Json(json!({"status": "success", "data": price}))),
            Err((status, reply)) => (status, Json(reply)),
        }
    }

    async fn fake_calculate_batch(
        State(recorded): State<RecordedRequests>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        recorded.record(&body);
        let customers = body["customers"].as_array().cloned().unwrap_or_default();
        let priced: Result<Vec<Value>, _> = customers.iter().map(price_or_reject).collect();
        match priced {
            Ok(prices) => (StatusCode::OK, Json(json!({"status": "success", "data": prices}))),
            Err((status, reply)) => (status, Json(reply)),
        }
    }

    async fn fake_test_model() -> Json<Value> {
        let customer = sample_customer();
        Json(json!({
            "status": "success",
            "message": "Model test successful",
            "test_result": fake_price(&customer),
            "test_input": customer
        }))
    }

    async fn fake_health() -> Json<Value> {
        Json(json!({"status": "healthy"}))
    }

    /// Start a fake pricing service on an ephemeral port and return its base URL.
    pub async fn spawn_fake_pricing_service() -> (String, RecordedRequests) {
        let recorded = RecordedRequests::default();
        let app = Router::new()
            .route(CALCULATE_PRICE_PATH, post(fake_calculate_price))
            .route(CALCULATE_BATCH_PATH, post(fake_calculate_batch))
            .route(TEST_MODEL_PATH, get(fake_test_model))
            .route(HEALTH_PATH, get(fake_health))
            .with_state(recorded.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake pricing service");
        let address = listener.local_addr().expect("Fake pricing service has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake pricing service failed");
        });

        (format!("http://{}", address), recorded)
    }

    /// Base URL of a port nothing listens on.
    pub async fn unreachable_upstream_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to reserve a port");
        let address = listener.local_addr().expect("Reserved port has no address");
        drop(listener);
        format!("http://{}", address)
    }

    /// Create a throwaway frontend build directory holding only `index.html`.
    pub fn setup_static_dir() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let dir = std::env::temp_dir().join(format!(
            "pricing-console-dist-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        std::fs::create_dir_all(&dir).expect("Failed to create static dir");
        std::fs::write(
            dir.join("index.html"),
            format!("<!DOCTYPE html><html><head><title>{}</title></head><body></body></html>", TEST_PAGE_TITLE),
        )
        .expect("Failed to write index.html");
        dir
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// Installed once as the global subscriber so spawned server tasks log too.
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let log_level = std::env::var("RUST_LOG")
                .ok()
                .and_then(|level| match level.to_uppercase().as_str() {
                    "ERROR" => Some(Level::ERROR),
                    "WARN" => Some(Level::WARN),
                    "INFO" => Some(Level::INFO),
                    "DEBUG" => Some(Level::DEBUG),
                    "TRACE" => Some(Level::TRACE),
                    _ => None,
                })
                .unwrap_or(Level::WARN);

            let subscriber = FmtSubscriber::builder()
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .finish();
            if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
                eprintln!("Test tracing not installed: {}", e);
            }
        });
    }

    /// Create axum app for testing, relaying to `upstream_url`
    pub fn setup_test_app(upstream_url: &str) -> Router {
        init_test_tracing();

        let upstream = PricingUpstream::new(upstream_url, Duration::from_secs(5))
            .expect("Failed to create pricing service client");
        create_router(AppState { upstream }, &setup_static_dir(), Duration::from_secs(10))
    }
}
