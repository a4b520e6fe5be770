//! certmint - mock certificate and NFT issuance API.

use std::net::SocketAddr;

use certmint_api::config::{
    DEFAULT_BIND_ADDR, DEFAULT_CERTIFICATE_ISSUER, DEFAULT_CONTRACT_ADDRESS,
};
use certmint_api::{CERTIFICATES_PATH, CertificateServer, ServerConfig, SharedSecret};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "certmint")]
#[command(about = "Mock digital certificate and NFT issuance API")]
#[command(version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "CERTMINT_BIND_ADDR", default_value_t = DEFAULT_BIND_ADDR)]
    bind: SocketAddr,

    /// Shared secret callers must send as `apiKey`
    #[arg(long, env = "CERTMINT_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Contract address reported in NFT records
    #[arg(long, env = "CERTMINT_CONTRACT_ADDRESS", default_value = DEFAULT_CONTRACT_ADDRESS)]
    contract_address: String,

    /// Issuer name reported in certificate summaries
    #[arg(long, env = "CERTMINT_CERTIFICATE_ISSUER", default_value = DEFAULT_CERTIFICATE_ISSUER)]
    certificate_issuer: String,

    /// Allowed CORS origin; repeat or comma-separate. Empty disables CORS.
    #[arg(long = "cors-origin", env = "CERTMINT_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,

    /// Emit logs as JSON
    #[arg(long, env = "CERTMINT_LOG_JSON")]
    log_json: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<ServerConfig> {
        let secret = SharedSecret::new(self.api_key)?;
        let config = self
            .cors_origins
            .into_iter()
            .fold(ServerConfig::new(self.bind, secret), |config, origin| {
                config.with_cors_origin(origin)
            })
            .with_contract_address(self.contract_address)
            .with_certificate_issuer(self.certificate_issuer);
        Ok(config)
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = cli.into_config()?;
    let bind_addr = config.bind_addr;

    info!("Starting certmint on {}", bind_addr);
    info!("  Endpoint: POST http://{}{}", bind_addr, CERTIFICATES_PATH);

    let server = CertificateServer::new(config);
    server.serve_with_shutdown(bind_addr, shutdown_signal()).await?;

    Ok(())
}
