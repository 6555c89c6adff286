// Built-in tariff table restricted to the configured codes
use crate::application::tariff_repository::TariffScheduleRepository;
use crate::domain::error::{BillingError, BillingResult};
use crate::domain::tariff::{TariffCode, TariffSchedule};

#[derive(Debug, Clone)]
pub struct StaticTariffTable {
    enabled: Vec<TariffCode>,
}

impl StaticTariffTable {
    /// An empty list enables every tariff. Duplicates are dropped, first
    /// occurrence wins.
    pub fn new(enabled: Vec<TariffCode>) -> Self {
        if enabled.is_empty() {
            tracing::warn!("No tariffs enabled in configuration, enabling all");
            return Self {
                enabled: TariffCode::ALL.to_vec(),
            };
        }

        let mut unique = Vec::with_capacity(enabled.len());
        for code in enabled {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }

        Self { enabled: unique }
    }
}

impl TariffScheduleRepository for StaticTariffTable {
    fn schedule(&self, code: TariffCode) -> BillingResult<TariffSchedule> {
        if self.enabled.contains(&code) {
            Ok(code.schedule())
        } else {
            Err(BillingError::UnknownTariff(code.to_string()))
        }
    }

    fn available(&self) -> Vec<TariffCode> {
        self.enabled.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_enabled_codes_resolve() {
        let table = StaticTariffTable::new(vec![TariffCode::DA, TariffCode::C]);
        assert_eq!(table.schedule(TariffCode::DA).unwrap().prices[0], 2.342);
        assert_eq!(
            table.schedule(TariffCode::R),
            Err(BillingError::UnknownTariff("R".to_string()))
        );
    }

    #[test]
    fn test_empty_list_enables_everything() {
        let table = StaticTariffTable::new(Vec::new());
        assert_eq!(table.available(), TariffCode::ALL.to_vec());
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let table = StaticTariffTable::new(vec![TariffCode::I, TariffCode::DA, TariffCode::I]);
        assert_eq!(table.available(), vec![TariffCode::I, TariffCode::DA]);
        assert_eq!(table.block_names()[0], "Básico");
    }
}
