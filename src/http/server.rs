//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, timeout, gateway context)
//! - Swap the registry when configuration reloads
//! - Serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::context::GatewayContextLayer;
use crate::http::handlers;
use crate::lifecycle::ShutdownSignal;
use crate::registry::Registry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Current registry snapshot; replaced wholesale on reload.
    pub registry: Arc<ArcSwap<Registry>>,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(ArcSwap::from_pointee(registry)),
        }
    }
}

/// HTTP server for a service behind the gateway.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::new(config.registry.clone());
        let router = build_router(&config, state.clone());

        Self { router, state }
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Registries arriving on `registry_updates` replace the current one;
    /// requests already in flight keep the snapshot they started with.
    pub async fn run(
        self,
        listener: TcpListener,
        registry_updates: mpsc::UnboundedReceiver<Registry>,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        tokio::spawn(apply_reloads(
            self.state.registry.clone(),
            registry_updates,
            shutdown.clone(),
        ));

        let mut shutdown = shutdown;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.recv().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    let context_layer = GatewayContextLayer::new(state.registry.clone());

    Router::new()
        .route("/health", get(handlers::health))
        .route("/context", get(handlers::context))
        .route("/path/{service}", get(handlers::service_path))
        .route("/path/{service}/{version}", get(handlers::versioned_service_path))
        .with_state(state)
        .layer(context_layer)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn apply_reloads(
    registry: Arc<ArcSwap<Registry>>,
    mut updates: mpsc::UnboundedReceiver<Registry>,
    mut shutdown: ShutdownSignal,
) {
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(next) => {
                    tracing::info!(
                        registry = %next.name,
                        controller = ?next.controller(),
                        "Registry reloaded"
                    );
                    registry.store(Arc::new(next));
                }
                None => break,
            },
            _ = shutdown.recv() => break,
        }
    }
}
