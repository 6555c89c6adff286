// Consumption history series for the hourly and monthly charts
use super::consumption::{HourlyReading, MonthlyConsumption};
use chrono::NaiveTime;
use serde::Serialize;

/// Days averaged by the monthly trend line
pub const MOVING_AVERAGE_WINDOW: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyBar {
    pub hour: String,
    /// Consumption since the previous reading, never negative
    pub consumo: f64,
    /// Cumulative meter reading at this hour
    pub cumulado: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyChart {
    pub bars: Vec<HourlyBar>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    /// Day of month, `DD`
    pub day: String,
    pub fecha: String,
    pub total_dia: f64,
    #[serde(rename = "MA7")]
    pub ma7: Option<f64>,
    pub pico: f64,
    pub hora_pico: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyChart {
    pub days: Vec<DailyPoint>,
    pub consumo_total: f64,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// Backend hours come as `8:00:00` or `08:00`; unparseable ones sort first
fn hour_key(hora: &str) -> (Option<NaiveTime>, String) {
    let time = NaiveTime::parse_from_str(hora, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(hora, "%H:%M"))
        .ok();
    (time, hora.to_string())
}

/// Per-hour consumption from a day of cumulative readings.
///
/// The first bar has no delta. A reading lower than the previous one (meter
/// reset or bad sample) counts as 0, and the day total is the sum of the
/// deltas, so it is never negative.
pub fn hourly_chart(points: &[HourlyReading]) -> HourlyChart {
    let mut sorted: Vec<&HourlyReading> = points.iter().collect();
    sorted.sort_by_cached_key(|p| hour_key(&p.hora));

    let bars: Vec<HourlyBar> = sorted
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let delta = match i {
                0 => 0.0,
                _ => {
                    let raw = point.lectura - sorted[i - 1].lectura;
                    if raw.is_finite() && raw > 0.0 { raw } else { 0.0 }
                }
            };
            HourlyBar {
                hour: point.hora.clone(),
                consumo: round_to(delta, 2),
                cumulado: round_to(point.lectura, 2),
            }
        })
        .collect();

    let total = round_to(bars.iter().map(|b| b.consumo).sum(), 2);

    HourlyChart { bars, total }
}

/// Trailing average over `window` values; `None` until the window is full.
pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        out.push((i + 1 >= window).then(|| round_to(sum / window as f64, 2)));
    }
    out
}

/// Daily series for a month, ordered by date, with a 7-day trend line.
pub fn monthly_chart(month: &MonthlyConsumption) -> MonthlyChart {
    let mut days: Vec<_> = month.datos.iter().collect();
    days.sort_by(|a, b| a.fecha.cmp(&b.fecha));

    let totals: Vec<f64> = days.iter().map(|d| d.total_dia).collect();
    let trend = moving_average(&totals, MOVING_AVERAGE_WINDOW);

    let days = days
        .into_iter()
        .zip(trend)
        .map(|(d, ma7)| DailyPoint {
            day: d.fecha.get(8..10).unwrap_or(&d.fecha).to_string(),
            fecha: d.fecha.clone(),
            total_dia: round_to(d.total_dia, 3),
            ma7,
            pico: round_to(d.pico_consumo, 5),
            hora_pico: d.hora_pico.clone(),
        })
        .collect();

    MonthlyChart {
        days,
        consumo_total: round_to(month.consumo_total, 4),
    }
}
