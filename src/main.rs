use std::sync::Arc;

use anyhow::{Context, Result};
use employee_directory::{
    AppConfig, AppState, DirectoryBackend, DirectoryClient, EmployeeService, HttpDirectoryClient,
    InMemoryDirectoryClient, build_router,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("failed to load application configuration")?;

    let client: Arc<dyn DirectoryClient> = match config.directory_backend {
        DirectoryBackend::Remote => {
            info!(base_url = %config.directory_base_url, "directory backend: remote");
            Arc::new(
                HttpDirectoryClient::new(&config)
                    .context("failed to build directory HTTP client")?,
            )
        }
        DirectoryBackend::Memory => {
            info!("directory backend: in-memory");
            Arc::new(InMemoryDirectoryClient::new())
        }
    };

    let app = build_router(AppState::new(EmployeeService::new(client)));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "employee directory facade started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("employee_directory=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
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
}
