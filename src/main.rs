// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use weather_telemetry::application::chart_service::ChartService;
use weather_telemetry::application::feeds::{ChartBoard, HeadlineBoard, HeadlineFeed, HistoryFeed};
use weather_telemetry::application::range_resolver::SystemClock;
use weather_telemetry::application::scheduler::RefreshScheduler;
use weather_telemetry::application::session::SessionContext;
use weather_telemetry::application::telemetry_source::TelemetrySource;
use weather_telemetry::infrastructure::config::load_config;
use weather_telemetry::infrastructure::http_source::HttpTelemetrySource;
use weather_telemetry::presentation::app_state::AppState;
use weather_telemetry::presentation::handlers::{
    analysis, create_session, current_readings, end_session, get_chart, health_check,
    list_charts, resolve_range,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_config().context("Failed to load configuration")?;

    // Create telemetry source (infrastructure layer)
    let source: Arc<dyn TelemetrySource> = Arc::new(HttpTelemetrySource::new(
        config.api.base_url.clone(),
        std::time::Duration::from_secs(config.api.timeout_secs),
    )?);

    // Create feeds (application layer)
    let charts = Arc::new(ChartBoard::new());
    let headline = Arc::new(HeadlineBoard::new());
    let chart_service = ChartService::new(config.charts.clone(), config.band);

    let mut scheduler = RefreshScheduler::new();
    scheduler.spawn_feed(
        Arc::new(HistoryFeed::new(source.clone(), chart_service, charts.clone())),
        config.refresh.history_period(),
    );
    scheduler.spawn_feed(
        Arc::new(HeadlineFeed::new(source.clone(), headline.clone())),
        config.refresh.headline_period(),
    );

    // Create application state
    let state = AppState {
        charts,
        headline,
        session: Arc::new(SessionContext::new()),
        source,
        clock: Arc::new(SystemClock),
    };

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/session", post(create_session).delete(end_session))
        .route("/charts", get(list_charts))
        .route("/charts/:metric", get(get_chart))
        .route("/readings/current", get(current_readings))
        .route("/ranges/:shortcut", get(resolve_range))
        .route("/analysis", get(analysis))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting weather-telemetry service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    tracing::info!("Shutting down refresh feeds");
    scheduler.shutdown().await;

    Ok(())
}
