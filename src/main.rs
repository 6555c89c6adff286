// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::billing_service::BillingService;
use crate::application::dashboard_service::DashboardService;
use crate::application::history_service::HistoryService;
use crate::application::streaming_service::LiveBillingService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::consumption_api::HttpConsumptionRepository;
use crate::infrastructure::tariff_table::StaticTariffTable;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    billing_range, billing_statement, billing_total, dashboard, default_dashboard, get_tariff,
    health_check, hourly_history, list_tariffs, live_billing, monthly_history, year_forecast,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repositories (infrastructure layer)
    let tariffs = Arc::new(StaticTariffTable::new(config.billing.enabled_tariffs.clone()));
    let consumption = Arc::new(HttpConsumptionRepository::new(
        config.backend.base_url.clone(),
        Duration::from_secs(config.backend.timeout_secs),
    )?);

    // Create services (application layer)
    let billing_service = BillingService::new(tariffs);
    let dashboard_service = DashboardService::new(billing_service.clone(), consumption.clone());
    let history_service = HistoryService::new(consumption.clone());
    let live_service = LiveBillingService::new(
        billing_service.clone(),
        consumption,
        Duration::from_secs(config.live.poll_interval_secs.max(1)),
    );

    // Create application state
    let state = Arc::new(AppState {
        billing_service,
        dashboard_service,
        history_service,
        live_service,
        default_tariff: config.billing.default_tariff,
    });

    // Build router (presentation layer)
    // The live stream stays out of the compression layer so each line is
    // flushed as soon as it is produced
    let api = Router::new()
        .route("/tariffs", get(list_tariffs))
        .route("/tariffs/:code", get(get_tariff))
        .route("/billing/:code/total", get(billing_total))
        .route("/billing/:code/range", get(billing_range))
        .route("/billing/:code/statement", get(billing_statement))
        .route("/dashboard", get(default_dashboard))
        .route("/dashboard/:code", get(dashboard))
        .route("/history/hourly", get(hourly_history))
        .route("/history/monthly", get(monthly_history))
        .route("/forecast/year", get(year_forecast))
        .layer(CompressionLayer::new());

    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/billing/:code/live", get(live_billing))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.addr().parse()?;
    tracing::info!(
        "Starting water-billing service on {} (backend {})",
        addr,
        config.backend.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
