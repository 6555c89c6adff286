// Progressive block billing and consumption range classification
use super::error::{BillingError, BillingResult};
use super::tariff::{BLOCK_COUNT, BLOCK_NAMES, EXCEDENTE, TariffSchedule};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Largest consumption (m³) accepted for billing
pub const MAX_BILLABLE_CONSUMPTION: f64 = 1e20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeClassification {
    pub block_index: usize,
    pub block_name: &'static str,
    /// Consumption left before moving to the next named block (0 in excedente)
    pub to_next: f64,
    /// Sum of the five finite blocks
    pub total_capacity: f64,
}

impl RangeClassification {
    pub fn is_excedente(&self) -> bool {
        self.block_index == EXCEDENTE
    }

    pub fn next_block_name(&self) -> Option<&'static str> {
        BLOCK_NAMES.get(self.block_index + 1).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Green,
    Yellow,
    Orange,
    Red,
}

impl Severity {
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Green => "#60D394",
            Severity::Yellow => "#F7CB73",
            Severity::Orange => "#F18F01",
            Severity::Red => "#D7263D",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptLine {
    pub block_name: &'static str,
    pub consumption: f64,
    pub unit_price: f64,
    pub amount: Decimal,
}

/// Coerce a raw reading into something billable.
///
/// Negative and non-finite readings become 0. Finite readings above
/// [`MAX_BILLABLE_CONSUMPTION`] are rejected.
pub fn billable_consumption(consumption: f64) -> BillingResult<f64> {
    if !consumption.is_finite() || consumption < 0.0 {
        tracing::warn!(consumption, "coercing invalid consumption reading to 0");
        return Ok(0.0);
    }
    if consumption > MAX_BILLABLE_CONSUMPTION {
        return Err(BillingError::ConsumptionOutOfRange(consumption));
    }
    // folds -0.0 into 0.0
    Ok(if consumption == 0.0 { 0.0 } else { consumption })
}

/// Round a monetary amount to cents, half-up
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// Goes through the shortest round-trip text form so 2.342 stays 2.342
fn decimal(value: f64) -> BillingResult<Decimal> {
    value
        .to_string()
        .parse()
        .map_err(|_| BillingError::UnrepresentableAmount(value))
}

/// Total amount due for `consumption` under `schedule`.
///
/// Blocks 0-4 each absorb up to their capacity at their own unit price; the
/// walk stops as soon as nothing is left, so a reading sitting exactly on a
/// block boundary never enters the next block. Whatever is left after block 4
/// is billed at the excedente price with no cap.
pub fn total_due(schedule: &TariffSchedule, consumption: f64) -> BillingResult<Decimal> {
    let consumption = billable_consumption(consumption)?;
    let capacities = schedule.finite_capacities();

    let mut remaining = decimal(consumption)?;
    let mut total = Decimal::ZERO;

    for (i, price) in schedule.prices.iter().enumerate() {
        let price = decimal(*price)?;

        if i == EXCEDENTE {
            total += remaining * price;
            break;
        }

        let billed = remaining.min(decimal(capacities[i])?);
        total += billed * price;
        remaining -= billed;

        if remaining <= Decimal::ZERO {
            break;
        }
    }

    Ok(round_currency(total))
}

/// Named block the reading currently sits in.
///
/// Each block's own capacity is subtracted from a running remainder; the
/// first block whose capacity covers the remainder is the current one.
/// Readings beyond all five finite blocks are excedente with nothing to next.
pub fn classify_range(
    schedule: &TariffSchedule,
    consumption: f64,
) -> BillingResult<RangeClassification> {
    let consumption = billable_consumption(consumption)?;
    let capacities = schedule.finite_capacities();
    let total_capacity = schedule.total_capacity();

    let mut remaining = consumption;
    for (i, cap) in capacities.iter().enumerate() {
        if remaining <= *cap {
            return Ok(RangeClassification {
                block_index: i,
                block_name: BLOCK_NAMES[i],
                to_next: (cap - remaining).max(0.0),
                total_capacity,
            });
        }
        remaining -= cap;
    }

    Ok(RangeClassification {
        block_index: EXCEDENTE,
        block_name: BLOCK_NAMES[EXCEDENTE],
        to_next: 0.0,
        total_capacity,
    })
}

/// Split a reading into the quantity that falls in each block, using
/// cumulative boundaries of the five finite blocks.
pub fn consumption_breakdown(
    schedule: &TariffSchedule,
    consumption: f64,
) -> BillingResult<[f64; BLOCK_COUNT]> {
    let consumption = billable_consumption(consumption)?;
    let capacities = schedule.finite_capacities();

    let mut blocks = [0.0; BLOCK_COUNT];
    let mut boundary = 0.0;
    for (i, cap) in capacities.iter().enumerate() {
        if consumption <= boundary + cap {
            blocks[i] = consumption - boundary;
            return Ok(blocks);
        }
        blocks[i] = *cap;
        boundary += cap;
    }
    blocks[EXCEDENTE] = consumption - boundary;

    Ok(blocks)
}

/// Per-block receipt lines; amounts are rounded individually.
pub fn receipt_lines(
    schedule: &TariffSchedule,
    consumption: f64,
) -> BillingResult<Vec<ReceiptLine>> {
    let blocks = consumption_breakdown(schedule, consumption)?;

    blocks
        .iter()
        .zip(schedule.prices.iter())
        .zip(BLOCK_NAMES.iter())
        .map(|((quantity, price), name)| {
            Ok(ReceiptLine {
                block_name: *name,
                consumption: *quantity,
                unit_price: *price,
                amount: round_currency(decimal(*quantity)? * decimal(*price)?),
            })
        })
        .collect()
}

/// Severity tier for the reading relative to the whole raw schedule,
/// excedente placeholder included.
pub fn severity(schedule: &TariffSchedule, consumption: f64) -> BillingResult<Severity> {
    let consumption = billable_consumption(consumption)?;
    let total = schedule.raw_capacity_sum();

    let ratio = if total > 0.0 {
        consumption / total
    } else if consumption > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    Ok(if ratio <= 0.4 {
        Severity::Green
    } else if ratio <= 0.7 {
        Severity::Yellow
    } else if ratio <= 1.0 {
        Severity::Orange
    } else {
        Severity::Red
    })
}

/// Fraction of the finite capacity used, bounded to [0, 1]
pub fn progress(consumption: f64, total_capacity: f64) -> f64 {
    if total_capacity > 0.0 {
        (consumption / total_capacity).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
