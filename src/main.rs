use crossover::config::Config;
use crossover::services::RefreshService;
use crossover::sources::YahooFinanceClient;
use crossover::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crossover=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!(
        "Charting {} ({} / {}) with SMA {}/{} every {}s",
        config.chart.symbol,
        config.chart.range.as_str(),
        config.chart.interval.as_str(),
        config.chart.signals.short_window,
        config.chart.signals.long_window,
        config.refresh_interval_secs
    );

    let provider = Arc::new(YahooFinanceClient::new(Duration::from_secs(
        config.provider_timeout_secs,
    ))?);
    let refresh = RefreshService::new(provider, config.chart.clone());

    let state = AppState {
        config: config.clone(),
        refresh,
    };

    // Start the server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Crossover server listening on {}", addr);

    axum::serve(listener, crossover::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
