//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, metrics, headers)
//! - Serve the static front end
//! - Bind server to a plain or TLS listener
//! - Drain in-flight requests on shutdown

use std::future::IntoFuture;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, get_service},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::error::{json_error_bodies, ApiError};
use crate::http::handlers;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::observability::metrics;
use crate::security::headers::with_security_headers;
use crate::security::limits::{body_limit_layer, limit_in_flight, InFlightLimit};
use crate::store::{ItemRepository, MemoryItemRepository};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
}

/// HTTP server for the item API and front end.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with a fresh in-memory repository.
    pub fn new(config: ServiceConfig) -> Self {
        let repository = if config.store.seed_samples {
            MemoryItemRepository::with_samples()
        } else {
            MemoryItemRepository::new()
        };
        Self::with_repository(config, Arc::new(repository))
    }

    /// Create a new HTTP server around an existing repository.
    pub fn with_repository(config: ServiceConfig, items: Arc<dyn ItemRepository>) -> Self {
        metrics::record_item_count(items.len());
        let state = AppState { items };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let api = Router::new()
            .route(
                "/api/items",
                get(handlers::list_items).post(handlers::create_item),
            )
            .route(
                "/api/items/{id}",
                get(handlers::get_item)
                    .put(handlers::update_item)
                    .delete(handlers::delete_item),
            )
            .route("/health", get(handlers::health))
            .with_state(state);

        let router = if config.static_files.enabled {
            let dir = Path::new(&config.static_files.dir);
            api.route("/", get_service(ServeFile::new(dir.join("index.html"))))
                .fallback_service(ServeDir::new(dir))
        } else {
            api.fallback(not_found)
        };

        let router = router
            .layer(middleware::from_fn(metrics::track_metrics))
            .layer(body_limit_layer(config.security.max_body_size))
            .layer(middleware::from_fn_with_state(
                InFlightLimit::new(config.listener.max_connections),
                limit_in_flight,
            ))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(middleware::from_fn(json_error_bodies));

        let router = if config.security.enable_headers {
            with_security_headers(router)
        } else {
            router
        };

        router
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run the server on `listener` until `shutdown` fires, then drain
    /// in-flight requests for at most the configured grace period.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        let mut drain_started = shutdown.resubscribe();

        let server = axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .into_future();

        let deadline = async move {
            let _ = drain_started.recv().await;
            tokio::time::sleep(grace).await;
        };

        tokio::select! {
            result = server => result?,
            _ = deadline => {
                tracing::warn!(grace_secs = grace.as_secs(), "Drain deadline elapsed, dropping connections");
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server over TLS on `addr` until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> io::Result<()> {
        tracing::info!(address = %addr, "HTTPS server starting");

        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received, draining connections");
            shutdown_handle.graceful_shutdown(Some(grace));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Fallback when no static directory is served.
async fn not_found() -> ApiError {
    ApiError::Rejected {
        status: StatusCode::NOT_FOUND,
        message: "Not found".to_string(),
    }
}
