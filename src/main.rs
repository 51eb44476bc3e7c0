//! Block explorer server.
//!
//! Loads configuration, reads the node credential (refusing to start without
//! it), and serves the explorer until Ctrl+C or SIGTERM.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use node_explorer::lifecycle::{startup, Shutdown};
use node_explorer::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "node-explorer")]
#[command(about = "Web block explorer for a full node's JSON-RPC interface", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = startup::load(args.config.as_deref(), args.bind)?;
    logging::init_logging(&config.observability);

    tracing::info!("node-explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        node_host = %config.node.host,
        node_port = config.node.port,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = match startup::build_server(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
