//! attest daemon — entry point for running the verification service.

use attest_node::{init_logging, LogFormat, Service, ServiceConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "attest-daemon", about = "attest knowledge-verification service")]
struct Cli {
    /// Host the HTTP API binds to.
    #[arg(long, env = "ATTEST_API_HOST")]
    api_host: Option<String>,

    /// Port the HTTP API binds to.
    #[arg(long, env = "ATTEST_API_PORT")]
    api_port: Option<u16>,

    /// Agent identity stamped on audit entries.
    #[arg(long, env = "ATTEST_AGENT_ID")]
    agent_id: Option<String>,

    /// Settle paid jobs through the external payment service.
    #[arg(long, env = "ATTEST_ENABLE_PAYMENTS")]
    payments: bool,

    /// Base URL of the payment service.
    #[arg(long, env = "ATTEST_PAYMENT_SERVICE_URL")]
    payment_service_url: Option<String>,

    /// API key for the payment service.
    #[arg(long, env = "ATTEST_PAYMENT_API_KEY")]
    payment_api_key: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "ATTEST_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "ATTEST_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// File config (when given) as the base, CLI/env values on top.
    fn into_config(self) -> anyhow::Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let path = path.to_string_lossy();
                ServiceConfig::from_toml_file(&path)?
            }
            None => ServiceConfig::default(),
        };

        if let Some(host) = self.api_host {
            config.api_host = host;
        }
        if let Some(port) = self.api_port {
            config.api_port = port;
        }
        if let Some(agent_id) = self.agent_id {
            config.agent_id = agent_id;
        }
        if self.payments {
            config.enable_payments = true;
        }
        if let Some(url) = self.payment_service_url {
            config.payment_service_url = url;
        }
        if let Some(key) = self.payment_api_key {
            config.payment_api_key = key;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.into_config()?;

    init_logging(LogFormat::from_config(&config.log_format), &config.log_level);
    tracing::info!(
        host = %config.api_host,
        port = config.api_port,
        "starting attest daemon"
    );

    let service = Service::build(config)?;
    service.run().await?;

    tracing::info!("attest daemon exited cleanly");
    Ok(())
}
