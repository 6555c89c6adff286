// Composite billing views handed to the presentation layer
use super::billing::{RangeClassification, ReceiptLine, Severity};
use super::insight::{MonthStatus, UsageTip};
use super::tariff::{BLOCK_COUNT, TariffCode};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TariffSummary {
    pub code: TariffCode,
    pub label: &'static str,
    pub block_names: [&'static str; BLOCK_COUNT],
    pub capacities: [f64; BLOCK_COUNT],
    pub prices: [f64; BLOCK_COUNT],
    pub total_capacity: f64,
}

/// Everything the receipt screen shows for one reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub tariff: TariffCode,
    pub consumption: f64,
    pub total: Decimal,
    pub range: RangeClassification,
    pub progress: f64,
    pub severity: Severity,
    pub color: &'static str,
    pub lines: Vec<ReceiptLine>,
    pub tip: UsageTip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub consumption: f64,
    pub total: Decimal,
    pub severity: Severity,
    pub status: MonthStatus,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub title: String,
    pub tariff: TariffCode,
    pub current: Option<Statement>,
    pub projected: Option<Projection>,
}

/// Pushed to live subscribers on every new meter reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingSnapshot {
    pub tariff: TariffCode,
    pub hora: String,
    pub reading: f64,
    pub total: Decimal,
    pub range: RangeClassification,
    pub severity: Severity,
}
