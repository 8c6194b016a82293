use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use crate::config::GatewayConfig;
use commands::{self_test, serve};

#[derive(Parser)]
#[command(name = "pricing-console")]
#[command(about = "Dynamic pricing console: serves the pricing form and relays the pricing API")]
#[command(version)]
pub struct Cli {
    /// Configuration file (YAML, TOML or JSON)
    ///
    /// Without this flag `pricing-console.*` in the working directory is used
    /// when present. Every setting can also be given as a `PRICING_CONSOLE_*`
    /// environment variable, e.g. PRICING_CONSOLE_UPSTREAM_URL.
    #[arg(short, long, global = true, env = "PRICING_CONSOLE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,

        /// Base URL of the pricing service (e.g., http://127.0.0.1:8000)
        #[arg(short, long)]
        upstream_url: Option<String>,

        /// Directory with the built frontend
        #[arg(short, long)]
        static_dir: Option<String>,
    },
    /// Run the pricing model self-test and print the sample result
    SelfTest {
        /// Base URL of the pricing service (e.g., http://127.0.0.1:8000)
        #[arg(short, long)]
        upstream_url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = GatewayConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Serve { bind_address, upstream_url, static_dir } => {
                serve(config.with_overrides(bind_address, upstream_url, static_dir)).await?;
            }
            Commands::SelfTest { upstream_url } => {
                self_test(config.with_overrides(None, upstream_url, None)).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags_are_optional() {
        let cli = Cli::try_parse_from(["pricing-console", "serve"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Serve { bind_address: None, upstream_url: None, static_dir: None }
        ));
    }

    #[test]
    fn test_self_test_accepts_upstream_and_global_config() {
        let cli = Cli::try_parse_from([
            "pricing-console",
            "self-test",
            "--upstream-url",
            "http://localhost:8000",
            "--config",
            "gateway.yaml",
        ])
        .unwrap();

        assert_eq!(cli.config.as_deref(), Some("gateway.yaml"));
        match cli.command {
            Commands::SelfTest { upstream_url } => {
                assert_eq!(upstream_url.as_deref(), Some("http://localhost:8000"));
            }
            _ => panic!("expected self-test command"),
        }
    }
}
