use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState},
    ledger::Ledger,
    metrics,
    quote::QuoteService,
    signals::shutdown_signal,
};

/// Sliced G-code for long prints runs to tens of megabytes
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Start the quote API server
///
/// This function:
/// 1. Resolves the cost model (already validated by `load_config`)
/// 2. Initializes metrics
/// 3. Binds to the configured address
/// 4. Serves requests until SIGINT/SIGTERM
pub async fn start_server(config: Config) -> Result<()> {
    let cost_model = config.pricing.cost_model()?;

    info!("Initializing Prometheus metrics...");
    let metrics_handle = Arc::new(metrics::init_metrics()?);

    let service = QuoteService::new(
        cost_model,
        Ledger::new(config.ledger.path.clone()),
        config.share.clone(),
    );
    let app_state = AppState {
        service: Arc::new(service),
    };

    let app = create_router(app_state, metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting print-quote API on {}", addr);
    info!(
        "Cost model: {:.2}/h printer, {:.2}/kg filament, {:.2}/h energy, {}% margin; ledger at {}",
        cost_model.printer_cost_per_hour,
        cost_model.filament_cost_per_kg,
        cost_model.energy_cost_per_hour,
        cost_model.profit_margin_percent,
        config.ledger.path.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(app_state: AppState, metrics_handle: Arc<PrometheusHandle>) -> Router {
    let api_routes = Router::new()
        .route("/v1/quote", post(handlers::quote::create_quote))
        .route("/v1/cost-model", get(handlers::quote::get_cost_model))
        .route("/v1/duration/parse", post(handlers::quote::parse_duration_text))
        .route("/v1/gcode/inspect", post(handlers::gcode::inspect_gcode))
        .route("/v1/ledger", get(handlers::ledger::list_ledger))
        .with_state(app_state);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics_handler::metrics))
        .with_state(metrics_handle)
        .merge(api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
