use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use salon_staff::config::Config;
use salon_staff::profile::ProfileService;
use salon_staff::session::SessionCache;
use salon_staff::store::postgres::PgStaffStore;
use salon_staff::store::storage::HttpObjectStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting salon staff service");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(config.db_timeout)
        .connect(&config.database_url)
        .await?;

    let staff_store = Arc::new(PgStaffStore::new(pool));
    let objects = Arc::new(HttpObjectStore::new(
        &config.storage.url,
        &config.storage.api_key,
        config.storage.timeout,
    )?);

    let session = SessionCache::new(&config.session_file);
    if let Some(staff) = session.load().await {
        tracing::info!(staff_id = %staff.id, "Resuming cached session");
    }

    let profiles = ProfileService::new(
        staff_store.clone(),
        staff_store,
        objects,
        session,
        &config.storage.bucket,
    );

    let addr = SocketAddr::new(config.host, config.port);
    let app = salon_staff::build_app(profiles, config.max_photo_size);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
