use std::{io, sync::Arc};

pub mod core;
pub mod error_handler;
mod routes;

use axum::{Router, routing::post};
use colored::Colorize;
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    core::app_state::{AppConfig, AppState},
    error_handler::{AppError, AppResult},
    routes::generate::generate_route::generate_route,
};

/// Builds the application router.
///
/// `/api/generate` is the only API route; everything else is served from
/// `config.server.static_dir`.
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/api/generate", post(generate_route))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Loads configuration from the environment and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let config = AppConfig::from_env()?;
    serve(config).await
}

/// Binds `config.server` and serves until Ctrl+C.
///
/// # Errors
/// [`AppError::Bind`] when the port is taken or not permitted (a hint is
/// printed to stderr first), [`AppError::Server`] if serving fails.
pub async fn serve(config: AppConfig) -> AppResult<()> {
    let addr = config.server.bind_addr();
    let port = config.server.port;
    let state = Arc::new(AppState::new(config)?);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(source) => {
            report_bind_error(port, &source);
            return Err(AppError::Bind { addr, source });
        }
    };

    info!(%addr, "Ask Gemini server listening");
    println!(
        "{} Ask Gemini server running on {}",
        "✔".green(),
        format!("http://localhost:{port}").cyan()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)
}

fn report_bind_error(port: u16, err: &io::Error) {
    error!(port, error = %err, "failed to bind listener");

    match err.kind() {
        io::ErrorKind::AddrInUse => {
            eprintln!("\n{} Port {port} is already in use!", "ERROR:".red().bold());
            eprintln!("\n{}", "Solutions:".yellow());
            eprintln!("   1. Stop the other server using this port");
            eprintln!("   2. Use a different port: PORT=4001 cargo run");
            eprintln!("   3. Find the process: lsof -i :{port}\n");
        }
        io::ErrorKind::PermissionDenied => {
            eprintln!(
                "\n{} Permission denied to bind to port {port}",
                "ERROR:".red().bold()
            );
            eprintln!("{} Try using a port >= 1024\n", "Hint:".yellow());
        }
        _ => {
            eprintln!("{} Server error: {err}", "ERROR:".red().bold());
        }
    }
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
