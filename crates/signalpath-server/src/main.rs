//! SignalPath server entry point.
//!
//! Selects the lead store, builds the shared state, then starts the Axum
//! HTTP server with graceful shutdown. Consent writes still in flight at
//! shutdown get a short grace period before the runtime stops.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use signalpath_server::config::{ServerConfig, StoreBackendType};
use signalpath_server::routes;
use signalpath_server::state::AppState;
use signalpath_store::{LeadStore, MemoryStore, RestStore, RestStoreConfig};

/// How long to wait after the listener closes for detached consent writes.
const CONSENT_DRAIN_GRACE: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(store = ?config.store, "SignalPath starting");

    let store = build_store(&config)?;
    let state = Arc::new(AppState::new(store, config.site.clone()));

    let app = routes::build_router(Arc::clone(&state));

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "SignalPath server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    let stats = state.consent.stats();
    let pending = stats
        .attempted
        .saturating_sub(stats.recorded.saturating_add(stats.failed));
    if pending > 0 {
        info!(pending, "waiting for consent writes to finish");
        tokio::time::sleep(CONSENT_DRAIN_GRACE).await;
    }

    info!("SignalPath server stopped");
    Ok(())
}

/// Pick the lead store from configuration.
fn build_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn LeadStore>> {
    match &config.store {
        StoreBackendType::Memory => {
            warn!("SUPABASE_URL/SUPABASE_ANON_KEY not set, using in-memory store (data will not persist)");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackendType::Rest {
            url,
            api_key,
            timeout,
        } => {
            info!(url = %url, timeout_secs = ?timeout.map(|t| t.as_secs()), "using hosted store");
            let store = RestStore::new(RestStoreConfig {
                url: url.clone(),
                api_key: api_key.clone(),
                timeout: *timeout,
            })
            .context("failed to build hosted store client")?;
            Ok(Arc::new(store))
        }
    }
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
