//! rp-probe: check connectivity to a report portal and list project dashboards

use clap::Parser;
use tracing::info;

use rp_client::config::{ENV_API_VERSION, ENV_ENDPOINT, ENV_PROJECT, ENV_TOKEN};
use rp_client::{ConnectionConfig, ReportClient};
use rp_shared::logging;

#[derive(Parser)]
#[command(name = "rp-probe")]
#[command(about = "Check a report portal connection and list project dashboards")]
struct Args {
    /// Service endpoint (scheme and API path are filled in when missing)
    #[arg(long)]
    endpoint: Option<String>,

    /// Project name
    #[arg(long)]
    project: Option<String>,

    /// Access token
    #[arg(long)]
    token: Option<String>,

    /// API version
    #[arg(long)]
    api_version: Option<i32>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Only check the connection
    #[arg(long)]
    check_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_tracing_with_level(Some(&args.log_level));

    // Command line values win over the environment and .env file
    let _ = dotenv::dotenv();
    let config = ConnectionConfig::from_lookup(|key| {
        let flag = match key {
            ENV_ENDPOINT => args.endpoint.clone(),
            ENV_PROJECT => args.project.clone(),
            ENV_TOKEN => args.token.clone(),
            ENV_API_VERSION => args.api_version.map(|v| v.to_string()),
            _ => None,
        };
        flag.or_else(|| std::env::var(key).ok())
    })?;

    info!("Probing {} (project {})", config.endpoint(), config.project());
    let client = ReportClient::with_timeout(config, std::time::Duration::from_secs(args.timeout_secs))?;

    if let Err(e) = client.check_connect().await {
        logging::log_error("Connection check", &e);
        return Err(e.into());
    }
    logging::log_success("Connection check passed");

    if args.check_only {
        return Ok(());
    }

    let dashboards = client.get_dashboards().await?;
    println!("Found {} dashboard(s)", dashboards.len());
    for dashboard in dashboards {
        let shared = if dashboard.share { "shared" } else { "private" };
        println!(
            "  {} [{}] owner={} {} widgets={}",
            dashboard.name,
            dashboard.id,
            dashboard.owner,
            shared,
            dashboard.widgets.len()
        );
    }

    Ok(())
}
