//! Jira MCP server binary.
//!
//! Serves over stdio by default, or over streamable HTTP with `--http`.
//! Connection settings come from `JIRA_URL`, `JIRA_EMAIL` and `JIRA_PAT`
//! (a `.env` file is honored).

use clap::Parser;
use jira_api::{JiraClient, JiraConfig};
use jira_mcp::JiraMcpServer;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jira-mcp", version, about = "MCP server exposing Jira issue tracking as tools")]
struct Args {
    /// Serve over streamable HTTP instead of stdio.
    #[arg(long)]
    http: bool,

    /// Bind address for the HTTP transport.
    #[arg(long, default_value = "127.0.0.1:3001")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout belongs to the stdio transport.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = JiraConfig::from_env()?;
    let client = JiraClient::new(config)?;
    let server = JiraMcpServer::new(Arc::new(client));

    if args.http {
        tracing::info!(addr = %args.addr, "Starting jira-mcp server over streamable HTTP");
        server.run_http(args.addr).await
    } else {
        tracing::info!("Starting jira-mcp server over stdio");
        server.run_stdio().await
    }
}
