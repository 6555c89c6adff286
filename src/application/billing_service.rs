// Billing service - Use cases for totals, range classification and receipts
use crate::application::tariff_repository::TariffScheduleRepository;
use crate::domain::billing::{self, RangeClassification, Severity};
use crate::domain::error::BillingResult;
use crate::domain::insight::usage_tip;
use crate::domain::statement::{Statement, TariffSummary};
use crate::domain::tariff::TariffCode;
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Clone)]
pub struct BillingService {
    repository: Arc<dyn TariffScheduleRepository>,
}

impl BillingService {
    pub fn new(repository: Arc<dyn TariffScheduleRepository>) -> Self {
        Self { repository }
    }

    pub fn total_due(&self, consumption: f64, code: TariffCode) -> BillingResult<Decimal> {
        let schedule = self.repository.schedule(code)?;
        billing::total_due(&schedule, consumption)
    }

    pub fn classify(&self, consumption: f64, code: TariffCode) -> BillingResult<RangeClassification> {
        let schedule = self.repository.schedule(code)?;
        billing::classify_range(&schedule, consumption)
    }

    pub fn severity(&self, consumption: f64, code: TariffCode) -> BillingResult<Severity> {
        let schedule = self.repository.schedule(code)?;
        billing::severity(&schedule, consumption)
    }

    /// Full receipt for one reading
    pub fn statement(&self, consumption: f64, code: TariffCode) -> BillingResult<Statement> {
        let schedule = self.repository.schedule(code)?;
        let consumption = billing::billable_consumption(consumption)?;

        let total = billing::total_due(&schedule, consumption)?;
        let range = billing::classify_range(&schedule, consumption)?;
        let severity = billing::severity(&schedule, consumption)?;
        let lines = billing::receipt_lines(&schedule, consumption)?;

        let block_capacity = schedule
            .finite_capacities()
            .get(range.block_index)
            .copied()
            .unwrap_or(0.0);
        let tip = usage_tip(consumption, &range, block_capacity);
        let progress = billing::progress(consumption, range.total_capacity);

        tracing::debug!(
            tariff = %code,
            consumption,
            total = %total,
            block = range.block_name,
            "statement computed"
        );

        Ok(Statement {
            tariff: code,
            consumption,
            total,
            range,
            progress,
            severity,
            color: severity.color(),
            lines,
            tip,
        })
    }

    pub fn tariff(&self, code: TariffCode) -> BillingResult<TariffSummary> {
        let schedule = self.repository.schedule(code)?;

        Ok(TariffSummary {
            code,
            label: code.label(),
            block_names: self.repository.block_names(),
            capacities: schedule.capacities,
            prices: schedule.prices,
            total_capacity: schedule.total_capacity(),
        })
    }

    /// Catalogue of every configured tariff
    pub fn tariffs(&self) -> Vec<TariffSummary> {
        self.repository
            .available()
            .into_iter()
            .filter_map(|code| self.tariff(code).ok())
            .collect()
    }
}
