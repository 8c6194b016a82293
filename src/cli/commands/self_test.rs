use anyhow::Result;
use common::{format_field_value, CustomerField};
use tracing::{debug, error, info};

use crate::config::GatewayConfig;
use crate::upstream::PricingUpstream;

/// Ask the pricing service for its canned scenario and print input and result.
pub async fn self_test(config: GatewayConfig) -> Result<()> {
    info!("Running model self-test against {}", config.upstream_url);
    let upstream = PricingUpstream::new(&config.upstream_url, config.request_timeout())?;

    let report = match upstream.test_model().await {
        Ok(report) => report,
        Err(e) => {
            error!("Model self-test failed: {}", e);
            return Err(e.into());
        }
    };
    debug!("Self-test report: {:?}", report);

    if let Some(message) = &report.message {
        println!("{}", message);
    }

    println!("Sample customer:");
    for (key, value) in &report.test_input {
        let label = CustomerField::from_key(key).map_or(key.as_str(), |field| field.label());
        println!("  {:<32} {}", label, format_field_value(*value));
    }

    println!("Price breakdown:");
    for (field, text) in report.test_result.formatted() {
        println!("  {:<32} {}", field.label(), text);
    }

    info!("Model test successful! Model is working correctly.");
    Ok(())
}
