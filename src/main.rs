use mimalloc::MiMalloc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use visitor_counter::config::Config;
use visitor_counter::service::{Initializer, Readiness};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let (cfg, cfg_err) = Config::load();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    if let Some(e) = cfg_err {
        warn!(error = %e, "failed to load configuration from env; using defaults");
    }

    info!(
        database_url = %cfg.redacted_database_url(),
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        init_max_attempts = cfg.init_max_attempts,
        init_retry_delay_secs = cfg.init_retry_delay_secs
    );

    let store = visitor_counter::db::open_store(&cfg);
    let readiness = Arc::new(Readiness::new());
    let initializer = Initializer::new(store.clone(), readiness, cfg.init_retry_policy());

    // Startup attempt; the lazy guard retries per request if this fails.
    if let Err(e) = initializer.ensure_schema().await {
        warn!(error = %e, "starting without a confirmed schema");
    }

    let state = visitor_counter::router::AppState::new(store, initializer);
    let app = visitor_counter::router::app_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
