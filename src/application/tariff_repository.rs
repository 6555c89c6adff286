// Repository trait for tariff schedules
use crate::domain::error::BillingResult;
use crate::domain::tariff::{BLOCK_COUNT, BLOCK_NAMES, TariffCode, TariffSchedule};

pub trait TariffScheduleRepository: Send + Sync {
    /// Block capacities and unit prices for a tariff.
    /// Fails with `UnknownTariff` when the code is not configured.
    fn schedule(&self, code: TariffCode) -> BillingResult<TariffSchedule>;

    /// Configured tariff codes, in display order
    fn available(&self) -> Vec<TariffCode>;

    /// Block labels, shared by every tariff
    fn block_names(&self) -> [&'static str; BLOCK_COUNT] {
        BLOCK_NAMES
    }
}
