//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use tripcalc_types::{HistoryStore, RateProvider};

use super::handlers::{self, AppState};
use crate::CalculatorService;

/// HTTP Server for the trip calculator API.
pub struct HttpServer<P: RateProvider, H: HistoryStore> {
    state: Arc<AppState<P, H>>,
}

impl<P: RateProvider, H: HistoryStore> HttpServer<P, H> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: CalculatorService<P, H>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/api/exchange", post(handlers::exchange::<P, H>))
            .route("/api/customs", post(handlers::customs::<P, H>))
            .route("/api/tip", post(handlers::tip::<P, H>))
            .route("/api/tip/cultures", get(handlers::tip_cultures::<P, H>))
            .route(
                "/api/tip/cultures/{country}",
                get(handlers::tip_culture::<P, H>),
            )
            .route("/api/currencies", get(handlers::currencies::<P, H>))
            .route("/api/rates/{from}/{to}", get(handlers::rate::<P, H>))
            .route(
                "/api/history",
                get(handlers::history::<P, H>).delete(handlers::clear_history::<P, H>),
            )
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
