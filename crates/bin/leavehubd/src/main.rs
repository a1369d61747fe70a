//! # leavehubd — leavehub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Start the auto-rejection sweeper
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use leavehub_adapter_http_axum::state::AppState;
use leavehub_adapter_storage_sqlite_sqlx::{
    SqliteApplicationRepository, SqliteEmployeeRepository, SqliteEventRepository,
};
use leavehub_app::mailer::TracingMailer;
use leavehub_app::services::application_service::ApplicationService;
use leavehub_app::services::employee_service::EmployeeService;
use leavehub_app::sweeper::Sweeper;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    // Logging
    let filter =
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Database
    let db = leavehub_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Services
    let application_service = Arc::new(ApplicationService::new(
        SqliteApplicationRepository::new(pool.clone()),
        SqliteEventRepository::new(pool.clone()),
        SqliteEmployeeRepository::new(pool.clone()),
        TracingMailer::new(config.mail.sender.clone()),
    ));
    let employee_service = Arc::new(EmployeeService::new(SqliteEmployeeRepository::new(pool)));

    // Sweeper
    let sweeper = config
        .sweeper
        .enabled
        .then(|| Sweeper::start(Arc::clone(&application_service), config.sweep_interval()));

    // HTTP
    let state = AppState::from_arcs(application_service, employee_service);
    let app = leavehub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "leavehubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(sweeper) = sweeper {
        sweeper.shutdown().await;
    }
    tracing::info!("leavehubd stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
