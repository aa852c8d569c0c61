//! Doctor Planet server binary.
//!
//! Boots the HTTP API: tracing, configuration, SQLite pool with
//! migrations, then the axum router until a shutdown signal arrives.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use drplanet_db::{Database, DbConfig};
use drplanet_server::routes;
use drplanet_server::{AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Doctor Planet server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        addr = %config.bind_address(),
        db = %config.database_path.display(),
        store = %config.store_name,
        "Configuration loaded"
    );

    // Connect to SQLite and run migrations
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database ready");

    let addr = config.bind_address();
    let state = AppState::new(db, config);
    let app = routes::router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=drplanet=trace` - Show trace for drplanet crates only
/// - Default: INFO level, sqlx query noise suppressed
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,drplanet=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
