// HTTP request handlers
use crate::domain::billing::{RangeClassification, Severity, billable_consumption, progress};
use crate::domain::consumption::YearForecast;
use crate::domain::history::{HourlyChart, MonthlyChart};
use crate::domain::statement::{DashboardSummary, Statement, TariffSummary};
use crate::domain::tariff::TariffCode;
use crate::infrastructure::ndjson_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ConsumptionQuery {
    pub consumption: f64,
}

#[derive(Deserialize)]
pub struct DayQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct MonthQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct TotalView {
    pub tariff: TariffCode,
    pub consumption: f64,
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct RangeView {
    #[serde(flatten)]
    pub range: RangeClassification,
    pub progress: f64,
    pub severity: Severity,
    pub color: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Every configured tariff with its schedule
pub async fn list_tariffs(State(state): State<Arc<AppState>>) -> Json<Vec<TariffSummary>> {
    Json(state.billing_service.tariffs())
}

pub async fn get_tariff(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<TariffSummary>, ApiError> {
    let code: TariffCode = code.parse()?;
    Ok(Json(state.billing_service.tariff(code)?))
}

pub async fn billing_total(
    Path(code): Path<String>,
    Query(query): Query<ConsumptionQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<TotalView>, ApiError> {
    let code: TariffCode = code.parse()?;
    let consumption = billable_consumption(query.consumption)?;
    let total = state.billing_service.total_due(consumption, code)?;

    Ok(Json(TotalView {
        tariff: code,
        consumption,
        total,
    }))
}

pub async fn billing_range(
    Path(code): Path<String>,
    Query(query): Query<ConsumptionQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RangeView>, ApiError> {
    let code: TariffCode = code.parse()?;
    let consumption = billable_consumption(query.consumption)?;
    let range = state.billing_service.classify(consumption, code)?;
    let severity = state.billing_service.severity(consumption, code)?;

    Ok(Json(RangeView {
        progress: progress(consumption, range.total_capacity),
        range,
        severity,
        color: severity.color(),
    }))
}

/// Receipt view: total, range, per-block lines and advice
pub async fn billing_statement(
    Path(code): Path<String>,
    Query(query): Query<ConsumptionQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Statement>, ApiError> {
    let code: TariffCode = code.parse()?;
    Ok(Json(state.billing_service.statement(query.consumption, code)?))
}

pub async fn dashboard(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardSummary>, ApiError> {
    let code: TariffCode = code.parse()?;
    dashboard_for(&state, code).await
}

/// Dashboard for the configured default tariff
pub async fn default_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardSummary>, ApiError> {
    dashboard_for(&state, state.default_tariff).await
}

async fn dashboard_for(state: &AppState, code: TariffCode) -> Result<Json<DashboardSummary>, ApiError> {
    let today = chrono::Local::now().date_naive();
    Ok(Json(state.dashboard_service.get_dashboard(code, today).await?))
}

/// Hourly consumption bars for a day, today by default
pub async fn hourly_history(
    Query(query): Query<DayQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<HourlyChart>, ApiError> {
    let date = query.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let chart = state
        .history_service
        .hourly(date)
        .await
        .map_err(ApiError::backend)?;
    Ok(Json(chart))
}

/// Daily series for a month, the current one by default
pub async fn monthly_history(
    Query(query): Query<MonthQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MonthlyChart>, ApiError> {
    let today = chrono::Local::now().date_naive();
    let month = query.month.unwrap_or(today.month());
    if !(1..=12).contains(&month) {
        return Err(ApiError::BadRequest(format!("mes fuera de rango: {}", month)));
    }
    let year = query.year.unwrap_or(today.year());

    let chart = state
        .history_service
        .monthly(month, year)
        .await
        .map_err(ApiError::backend)?;
    Ok(Json(chart))
}

pub async fn year_forecast(
    State(state): State<Arc<AppState>>,
) -> Result<Json<YearForecast>, ApiError> {
    let forecast = state
        .history_service
        .year_forecast()
        .await
        .map_err(ApiError::backend)?;
    Ok(Json(forecast))
}

/// Live bill for a tariff, one JSON line per new meter reading
pub async fn live_billing(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let code: TariffCode = code.parse()?;
    let rx = state.live_service.subscribe(code)?;

    tracing::info!(tariff = %code, "live billing subscriber connected");
    Ok(stream_from_receiver(rx).into_response())
}
