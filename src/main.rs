//! Example service sitting behind the gateway.
//!
//! ```text
//!     Gateway (auth, tenant, routing)
//!         │  soajsinjectobj: {...}
//!         ▼
//!   ┌───────────────────────────────┐
//!   │ request id → trace → timeout  │
//!   │ → gateway context layer       │
//!   │ → handlers                    │
//!   └───────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use gateway_context::config::{RegistryWatcher, ServiceConfig, load_config};
use gateway_context::lifecycle::{Shutdown, signals};
use gateway_context::observability::{logging, metrics};
use gateway_context::HttpServer;

#[derive(Parser)]
#[command(name = "gateway-context")]
#[command(about = "Service exposing the gateway request context", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the registry when the configuration file changes.
    #[arg(long, requires = "config")]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("gateway-context v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        registry = %config.registry.name,
        environment = %config.registry.environment,
        controller = ?config.registry.controller(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The watcher must outlive the server.
    let (_watcher, registry_updates) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = RegistryWatcher::new(path, config.registry.clone());
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_signal(shutdown));

    let server = HttpServer::new(config);
    server.run(listener, registry_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
