// Main entry point - Dependency injection, background tasks and panel server
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::clock_service::run_clock;
use crate::application::control_service::ControlDispatcher;
use crate::application::polling_service::PollingLoop;
use crate::infrastructure::config::load_monitor_config;
use crate::infrastructure::http_gateway::HttpTankGateway;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::panel_router;
use crate::presentation::view::PanelView;

// All tasks share one thread and suspend only at network and timer boundaries.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_monitor_config()?;

    // Backend gateway (infrastructure layer)
    let gateway = Arc::new(HttpTankGateway::new(
        config.backend.base_url.clone(),
        config.backend.request_timeout(),
    )?);

    let cancel = CancellationToken::new();

    // Rendering collaborator: the polling loop writes, the panel API reads
    let (clock_tx, clock_rx) = watch::channel(String::new());
    let (view, reader) = PanelView::new(clock_rx);

    // Background tasks (application layer)
    let poller = PollingLoop::new(gateway.clone(), Arc::new(view), config.polling.interval());
    let polling_task = tokio::spawn(poller.run(cancel.clone()));
    let clock_task = tokio::spawn(run_clock(clock_tx, cancel.clone()));

    let state = Arc::new(AppState {
        panel: reader,
        dispatcher: ControlDispatcher::new(gateway),
    });

    // Build router (presentation layer)
    let router = panel_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.panel.bind).await?;
    tracing::info!(
        panel = %listener.local_addr()?,
        backend = %config.backend.base_url,
        "tank-telemetry started"
    );

    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
            return;
        }
        tracing::info!("shutdown requested");
        on_signal.cancel();
    });

    let shutdown = cancel.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    cancel.cancel();
    let (polling, clock) = tokio::join!(polling_task, clock_task);
    if let Err(e) = polling {
        tracing::error!(error = %e, "polling task failed");
    }
    if let Err(e) = clock {
        tracing::error!(error = %e, "clock task failed");
    }
    Ok(())
}
