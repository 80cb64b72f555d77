use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;

use config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "jde-config-server")]
#[command(about = "HTTP interface to the JDE E1 9.2 R24 configuration knowledge base", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "jde-config.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "JDE_CONFIG_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    if args.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .init();
    }

    tracing::info!("Starting JDE configuration server");

    // Load configuration
    let config = ServerConfig::load(&args.config)?;

    // Start API server
    let addr = format!("{}:{}", args.host, args.port);
    api::serve(&addr, config).await?;

    Ok(())
}
