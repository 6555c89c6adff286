// Tariff codes and their progressive block schedules
use super::error::BillingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of blocks in every schedule (five finite blocks plus excedente)
pub const BLOCK_COUNT: usize = 6;

/// Index of the uncapped excedente block
pub const EXCEDENTE: usize = BLOCK_COUNT - 1;

pub const BLOCK_NAMES: [&str; BLOCK_COUNT] = [
    "Básico",
    "Intermedio bajo",
    "Intermedio medio",
    "Intermedio alto",
    "Alto",
    "Excedente",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TariffCode {
    /// Doméstica zona rural
    #[default]
    R,
    DA,
    DB,
    /// Condominial
    C,
    CA,
    CB,
    /// Industrial
    I,
}

impl TariffCode {
    pub const ALL: [TariffCode; 7] = [
        TariffCode::R,
        TariffCode::DA,
        TariffCode::DB,
        TariffCode::C,
        TariffCode::CA,
        TariffCode::CB,
        TariffCode::I,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TariffCode::R => "R",
            TariffCode::DA => "DA",
            TariffCode::DB => "DB",
            TariffCode::C => "C",
            TariffCode::CA => "CA",
            TariffCode::CB => "CB",
            TariffCode::I => "I",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TariffCode::R => "Doméstica Zona Rural",
            TariffCode::DA => "Doméstica A",
            TariffCode::DB => "Doméstica B",
            TariffCode::C => "Condominial",
            TariffCode::CA => "Comercial A",
            TariffCode::CB => "Comercial B",
            TariffCode::I => "Industrial",
        }
    }

    /// Built-in block table. The last capacity entry is a placeholder and is
    /// never used as a cap.
    pub fn schedule(&self) -> TariffSchedule {
        let (capacities, prices) = match self {
            TariffCode::R => (
                [30.0, 20.0, 25.0, 25.0, 0.0, 1.0],
                [1.993, 0.068, 0.071, 0.074, 0.0, 0.161],
            ),
            TariffCode::DA => (
                [15.0, 15.0, 20.0, 25.0, 25.0, 1.0],
                [2.342, 0.085, 0.095, 0.107, 0.228, 0.457],
            ),
            TariffCode::DB => (
                [15.0, 15.0, 20.0, 25.0, 25.0, 1.0],
                [4.573, 0.171, 0.195, 0.219, 0.435, 0.468],
            ),
            TariffCode::C => (
                [50.0, 50.0, 100.0, 200.0, 400.0, 1.0],
                [7.175, 0.2, 0.207, 0.322, 0.371, 0.468],
            ),
            TariffCode::CA => (
                [25.0, 25.0, 25.0, 50.0, 0.0, 1.0],
                [6.47, 0.289, 0.323, 0.382, 0.0, 0.503],
            ),
            TariffCode::CB => (
                [25.0, 25.0, 25.0, 50.0, 0.0, 1.0],
                [8.59, 0.406, 0.417, 0.45, 0.0, 0.51],
            ),
            TariffCode::I => (
                [30.0, 70.0, 100.0, 100.0, 0.0, 1.0],
                [8.59, 0.406, 0.417, 0.45, 0.0, 0.51],
            ),
        };

        TariffSchedule { capacities, prices }
    }
}

impl fmt::Display for TariffCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TariffCode {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        TariffCode::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| BillingError::UnknownTariff(code.to_string()))
    }
}

impl TryFrom<String> for TariffCode {
    type Error = BillingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TariffCode> for String {
    fn from(code: TariffCode) -> Self {
        code.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TariffSchedule {
    pub capacities: [f64; BLOCK_COUNT],
    pub prices: [f64; BLOCK_COUNT],
}

impl TariffSchedule {
    /// Capacities of the five finite blocks, negative entries read as zero
    pub fn finite_capacities(&self) -> [f64; EXCEDENTE] {
        let mut caps = [0.0; EXCEDENTE];
        for (cap, raw) in caps.iter_mut().zip(self.capacities.iter()) {
            *cap = raw.max(0.0);
        }
        caps
    }

    /// Sum of the five finite blocks
    pub fn total_capacity(&self) -> f64 {
        self.finite_capacities().iter().sum()
    }

    /// Sum of all six raw capacity entries, placeholder included
    pub fn raw_capacity_sum(&self) -> f64 {
        self.capacities.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("DA".parse::<TariffCode>(), Ok(TariffCode::DA));
        assert_eq!(" cb ".parse::<TariffCode>(), Ok(TariffCode::CB));
        assert_eq!(
            "X".parse::<TariffCode>(),
            Err(BillingError::UnknownTariff("X".to_string()))
        );
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for code in TariffCode::ALL {
            assert_eq!(code.to_string().parse::<TariffCode>(), Ok(code));
        }
    }

    #[test]
    fn test_serde_uses_short_code() {
        let json = serde_json::to_string(&TariffCode::DB).unwrap();
        assert_eq!(json, "\"DB\"");
        assert!(serde_json::from_str::<TariffCode>("\"ZZ\"").is_err());
    }

    #[test]
    fn test_capacity_sums() {
        let da = TariffCode::DA.schedule();
        assert_eq!(da.total_capacity(), 100.0);
        assert_eq!(da.raw_capacity_sum(), 101.0);

        let rural = TariffCode::R.schedule();
        assert_eq!(rural.finite_capacities(), [30.0, 20.0, 25.0, 25.0, 0.0]);
        assert_eq!(rural.total_capacity(), 100.0);
    }
}
