//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, metrics, limits, headers)
//! - Bind server to listener and shut down gracefully

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ExplorerConfig;
use crate::explorer::Explorer;
use crate::http::request::UuidRequestId;
use crate::http::{api, pages};
use crate::lifecycle::signals;
use crate::node::NodeRpc;
use crate::observability::{metrics, tracing::make_request_span};
use crate::security::headers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub explorer: Arc<Explorer>,
}

/// HTTP server for the explorer.
pub struct HttpServer {
    router: Router,
    config: ExplorerConfig,
}

impl HttpServer {
    /// Create a new HTTP server answering from `rpc`.
    pub fn new(config: ExplorerConfig, rpc: Arc<dyn NodeRpc>) -> Self {
        let explorer = Arc::new(Explorer::new(rpc, config.explorer.clone()));
        let state = AppState { explorer };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ExplorerConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(pages::index))
            .route("/block/{hash}", get(pages::block))
            .route("/search", get(pages::search_form))
            .route("/search/{query}", get(pages::search))
            .route("/api/info", get(api::info))
            .route("/api/blocks", get(api::blocks_default))
            .route("/api/blocks/{n}", get(api::blocks))
            .route("/api/block/{hash}", get(api::block))
            .route("/api/wallet/balance/{address}", get(api::balance))
            .route("/api/wallet/utxos/{address}", get(api::utxos))
            .route("/api/wallet/broadcast", post(api::broadcast))
            .route("/health", get(api::health))
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size));

        if config.security.enable_headers {
            router = headers::apply(router);
        }
        if let Some(secs) = config.timeouts.request_secs {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(secs)));
        }

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires or the process is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => tracing::info!("Shutdown requested"),
                    _ = signals::wait_for_signal() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }
}
