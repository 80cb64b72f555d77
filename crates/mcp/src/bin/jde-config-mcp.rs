// Standalone MCP server binary (stdio transport)

use anyhow::Result;
use clap::Parser;
use jde_config_core::KnowledgeBase;
use jde_config_mcp::server::McpServer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jde-config-mcp")]
#[command(about = "JDE E1 9.2 R24 configuration research MCP server (stdio)", long_about = None)]
struct Args {
    /// Emit logs as JSON lines
    #[arg(long, env = "JDE_CONFIG_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries protocol traffic, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::info!("JDE configuration MCP server starting...");

    let kb = Arc::new(KnowledgeBase::load());
    let server = McpServer::new(kb);
    server.start().await?;

    Ok(())
}
