use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Base name of the optional configuration file (`pricing-console.yaml`, `.toml`, ...)
pub const DEFAULT_CONFIG_FILE: &str = "pricing-console";

/// Prefix of environment variables overriding file settings, e.g. `PRICING_CONSOLE_UPSTREAM_URL`
pub const ENV_PREFIX: &str = "PRICING_CONSOLE";

/// Gateway configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to (IP:PORT)
    pub bind_address: String,
    /// Base URL of the external pricing service
    pub upstream_url: String,
    /// Directory holding the built frontend (`trunk build` output)
    pub static_dir: String,
    /// Per-request timeout, applied to inbound requests and upstream calls
    pub request_timeout_secs: u64,
}

impl GatewayConfig {
    /// Load configuration from defaults, the optional config file and the environment.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(config_file: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file_name = config_file.unwrap_or(DEFAULT_CONFIG_FILE);
        tracing::debug!("Loading configuration from '{}' and {}_* variables", file_name, ENV_PREFIX);

        let settings = config::Config::builder()
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("upstream_url", "http://127.0.0.1:8000")?
            .set_default("static_dir", "workspace/frontend/dist")?
            .set_default("request_timeout_secs", 30)?
            .add_source(config::File::with_name(file_name).required(config_file.is_some()))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("Failed to load configuration from '{}'", file_name))?;

        settings
            .try_deserialize()
            .context("Invalid gateway configuration")
    }

    /// Apply command line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        bind_address: Option<String>,
        upstream_url: Option<String>,
        static_dir: Option<String>,
    ) -> Self {
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        if let Some(upstream_url) = upstream_url {
            self.upstream_url = upstream_url;
        }
        if let Some(static_dir) = static_dir {
            self.static_dir = static_dir;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, contents: &str) -> String {
        let dir = std::env::temp_dir().join(format!("pricing-console-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_file_values_override_defaults() {
        let path = write_config(
            "gateway.yaml",
            "upstream_url: http://pricing.internal:9000\nrequest_timeout_secs: 5\n",
        );

        let config = GatewayConfig::load(Some(&path)).unwrap();

        assert_eq!(config.upstream_url, "http://pricing.internal:9000");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.static_dir, "workspace/frontend/dist");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = GatewayConfig::load(Some("/nonexistent/pricing-console-missing.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let path = write_config("overrides.yaml", "bind_address: 127.0.0.1:4000\n");
        let config = GatewayConfig::load(Some(&path))
            .unwrap()
            .with_overrides(None, Some("http://localhost:8100".to_string()), None);

        assert_eq!(config.bind_address, "127.0.0.1:4000");
        assert_eq!(config.upstream_url, "http://localhost:8100");
        assert_eq!(config.static_dir, "workspace/frontend/dist");
    }
}
