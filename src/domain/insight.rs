// Advice derived from a range classification and month progress
use super::billing::{RangeClassification, progress};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipKind {
    Info,
    Suggestion,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageTip {
    pub kind: TipKind,
    pub message: String,
}

impl UsageTip {
    fn new(kind: TipKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Pick the single most relevant tip for a reading.
///
/// `block_capacity` is the capacity of the block the reading sits in.
pub fn usage_tip(consumption: f64, range: &RangeClassification, block_capacity: f64) -> UsageTip {
    let total = range.total_capacity;
    let remaining_total = (total - consumption).max(0.0);
    // "close" means within 10% of the block, or 1 m³ for tiny blocks
    let near_jump = (0.1 * block_capacity).max(1.0);

    if range.is_excedente() {
        return UsageTip::new(
            TipKind::Warning,
            "Estás en excedente. Reduce consumos no críticos para evitar cargos elevados.",
        );
    }

    if remaining_total <= 0.1 * total {
        return UsageTip::new(
            TipKind::Warning,
            format!(
                "Muy cerca del límite del periodo: quedan {:.2} m³ del tope.",
                remaining_total
            ),
        );
    }

    if let Some(next) = range.next_block_name() {
        if range.to_next > 0.0 && range.to_next <= near_jump {
            return UsageTip::new(
                TipKind::Info,
                format!(
                    "Te faltan {:.2} m³ para pasar a “{}”. Considera posponer usos intensivos.",
                    range.to_next, next
                ),
            );
        }
    }

    if range.block_index == 0 && progress(consumption, total) < 0.3 {
        return UsageTip::new(
            TipKind::Suggestion,
            "Buen ritmo: mantén hábitos eficientes para permanecer en el rango Básico.",
        );
    }

    UsageTip::new(
        TipKind::Suggestion,
        "Revisa fugas y planifica usos intensivos para mantenerte en tu rango actual.",
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthStatus {
    Ahead,
    OnTrack,
    AtRisk,
}

impl MonthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MonthStatus::Ahead => "Adelantado",
            MonthStatus::OnTrack => "A tiempo",
            MonthStatus::AtRisk => "En riesgo",
        }
    }
}

/// Compare how far into the month's consumption we are against how far into
/// the month we are. A 5% band either way counts as on track.
pub fn month_status(progress: f64, days_done: u32, days_left: u32) -> MonthStatus {
    let total = (days_done + days_left).max(1) as f64;
    let expected = days_done as f64 / total;
    let delta = progress - expected;

    if delta > 0.05 {
        MonthStatus::Ahead
    } else if delta < -0.05 {
        MonthStatus::AtRisk
    } else {
        MonthStatus::OnTrack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::classify_range;
    use crate::domain::tariff::TariffCode;

    fn tip_for(code: TariffCode, consumption: f64) -> UsageTip {
        let schedule = code.schedule();
        let range = classify_range(&schedule, consumption).unwrap();
        let cap = schedule
            .finite_capacities()
            .get(range.block_index)
            .copied()
            .unwrap_or(0.0);
        usage_tip(consumption, &range, cap)
    }

    #[test]
    fn test_excedente_warns() {
        let tip = tip_for(TariffCode::DA, 120.0);
        assert_eq!(tip.kind, TipKind::Warning);
        assert!(tip.message.starts_with("Estás en excedente"));
    }

    #[test]
    fn test_near_total_cap_warns() {
        let tip = tip_for(TariffCode::DA, 92.5);
        assert_eq!(tip.kind, TipKind::Warning);
        assert_eq!(
            tip.message,
            "Muy cerca del límite del periodo: quedan 7.50 m³ del tope."
        );
    }

    #[test]
    fn test_near_next_block_informs() {
        // 1 m³ left in Básico (capacity 15, threshold 1.5)
        let tip = tip_for(TariffCode::DA, 14.0);
        assert_eq!(tip.kind, TipKind::Info);
        assert!(tip.message.contains("1.00 m³"));
        assert!(tip.message.contains("Intermedio bajo"));
    }

    #[test]
    fn test_low_usage_in_first_block() {
        let tip = tip_for(TariffCode::DA, 5.0);
        assert_eq!(tip.kind, TipKind::Suggestion);
        assert!(tip.message.starts_with("Buen ritmo"));
    }

    #[test]
    fn test_default_tip() {
        let tip = tip_for(TariffCode::DA, 40.0);
        assert_eq!(tip.kind, TipKind::Suggestion);
        assert!(tip.message.starts_with("Revisa fugas"));
    }

    #[test]
    fn test_month_status() {
        assert_eq!(month_status(0.5, 10, 20), MonthStatus::Ahead);
        assert_eq!(month_status(0.35, 10, 20), MonthStatus::OnTrack);
        assert_eq!(month_status(0.1, 10, 20), MonthStatus::AtRisk);
        // no days recorded yet
        assert_eq!(month_status(0.0, 0, 0), MonthStatus::OnTrack);
        assert_eq!(MonthStatus::AtRisk.label(), "En riesgo");
    }
}
