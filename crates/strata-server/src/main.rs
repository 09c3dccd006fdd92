//! # Strata Server
//!
//! Serves products (cache-aside) and orders (write-through) over HTTP.

use strata_config::{AppConfig, ConfigLoader};
use strata_core::telemetry::{init_logging, LogFormat};
use strata_core::{StrataError, StrataResult};
use strata_repository::{DatabasePool, DatabasePoolInterface};
use strata_rest::{create_router, with_metrics, AppState};
use strata_server::di::AppModule;
use strata_server::startup::{install_metrics, print_banner, print_startup_info};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let format = config
        .observability
        .log_format
        .parse::<LogFormat>()
        .unwrap_or_default();
    if let Err(e) = init_logging(&config.observability.log_level, format) {
        eprintln!("Failed to initialize logging: {e}");
    }

    print_banner();
    info!("Starting Strata server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> StrataResult<()> {
    let metrics_handle = install_metrics(&config)?;

    let db_pool = DatabasePool::new(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let module = AppModule::build(&config, &db_pool)?;
    let services = module.services(&config.cache);

    let state = module.health_checks().into_iter().fold(
        AppState::new(services.product_service, services.order_service),
        AppState::with_health_check,
    );

    let router = with_metrics(
        create_router(state, &config.server),
        &config.observability,
        metrics_handle,
    );

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StrataError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&config);
    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StrataError::Internal(format!("Server error: {}", e)))?;

    module.database_pool().close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
