//! HTTP routes and server lifecycle.

use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::handlers;
use crate::application::GenerateTasksUseCase;
use crate::connector::api::Container;

pub const GENERATE_PATH: &str = "/api/v1/tasks/generate";
pub const HEALTH_PATH: &str = "/api/v1/tasks/health";
pub const OPENAPI_PATH: &str = "/api/v1/openapi.json";

/// Shared application state.
pub struct AppState {
    pub generate_tasks: GenerateTasksUseCase,
}

pub fn app(container: &Container) -> Router {
    let state = Arc::new(AppState {
        generate_tasks: container.generate_tasks_use_case(),
    });

    Router::new()
        .route(GENERATE_PATH, post(handlers::generate_tasks))
        .route(HEALTH_PATH, get(handlers::health))
        .route(OPENAPI_PATH, get(handlers::openapi))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and run until Ctrl-C or SIGTERM.
pub async fn serve(container: &Container, host: &str, port: u16) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on {}", listener.local_addr()?);
    info!(
        "Using {} at temperature {}",
        container.provider_label(),
        container.config().temperature
    );

    axum::serve(listener, app(container))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
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
                error!("Failed to install SIGTERM handler: {e}");
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

    info!("Shutdown signal received");
}
