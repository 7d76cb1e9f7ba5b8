use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use council_server::config::{Cli, LogFormat};
use council_server::http::run_http_server;
use council_server::mcp::{MCPServer, ServerContext};
use council_server::widget::WidgetAssets;

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));

    match cli.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(true)
            .init(),
        LogFormat::Plain => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    info!("Starting council-server {}", env!("CARGO_PKG_VERSION"));
    info!("Assets directory: {}", cli.assets_dir.display());

    let assets = WidgetAssets::load(&cli.assets_dir);
    let server = Arc::new(MCPServer::new(ServerContext::new(&assets)));
    info!("Registered methods: {}", server.methods().join(", "));

    let addr = cli.bind_addr();
    run_http_server(server, &addr)
        .await
        .with_context(|| format!("HTTP server on {addr} failed"))?;

    info!("council-server stopped");
    Ok(())
}
