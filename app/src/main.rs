mod api;
mod config;
mod logging;
mod services;
mod web;

use color_eyre::{Result, eyre::WrapErr};
use domain::PortfolioStore;
use tokio::signal;

use crate::{config::Config, services::PortfolioHandle};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::from_env()?;

    // Initialize logging
    logging::init(config.log_format)?;
    tracing::info!("Starting Folio");
    tracing::debug!("Configuration: {config:#?}");

    let dataset = config.load_dataset()?;
    let store =
        PortfolioStore::new(dataset).wrap_err("portfolio dataset failed its integrity checks")?;

    let handle = PortfolioHandle::new(store);
    let app = web::create_app(api::create_api(handle), config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .wrap_err_with(|| format!("cannot listen on {}", config.listen_addr))?;
    tracing::info!("Server running on http://{}", config.listen_addr);
    tracing::info!(
        "API endpoints available at: http://{}/api/portfolio/*",
        config.listen_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Folio shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
