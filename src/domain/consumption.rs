// Consumption data served by the metering backend
use serde::{Deserialize, Serialize};

/// One hourly point of today's cumulative meter reading
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HourlyReading {
    pub fecha: String,
    pub hora: String,
    /// Cumulative reading in m³
    pub lectura: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyConsumption {
    pub fecha: String,
    #[serde(default)]
    pub hora_pico: Option<String>,
    #[serde(default)]
    pub pico_consumo: f64,
    pub total_dia: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyConsumption {
    pub consumo_total: f64,
    #[serde(default)]
    pub datos: Vec<DailyConsumption>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthForecast {
    pub mes: String,
    pub promedio_diario: f64,
    pub dias_registrados: u32,
    pub dias_restantes: u32,
    pub consumo_actual: f64,
    pub estimado_restante: f64,
    pub estimado_total_mes: f64,
}

impl MonthForecast {
    /// Fraction of the projected month total already consumed
    pub fn progress(&self) -> f64 {
        if self.estimado_total_mes > 0.0 {
            (self.consumo_actual / self.estimado_total_mes).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MonthTotal {
    /// Month key as sent by the backend, e.g. `2025-05`
    pub mes: String,
    pub total: f64,
}

/// Backend projection for the calendar year in progress
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearForecast {
    pub anio: i32,
    pub promedio_mensual: f64,
    pub meses_registrados: u32,
    pub consumo_actual: f64,
    pub meses_restantes: u32,
    pub estimado_restante: f64,
    pub estimado_total_anio: f64,
    #[serde(default)]
    pub consumo_por_mes: Vec<MonthTotal>,
}

/// Latest reading from today's series, if any
pub fn latest_reading(points: &[HourlyReading]) -> Option<&HourlyReading> {
    points.last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_monthly_payload() {
        let json = r#"{
            "consumoTotal": 42.5,
            "datos": [
                {"_id": "a", "fecha": "2025-05-01", "__v": 0, "horaPico": "8:00:00", "picoConsumo": 1.2, "totalDia": 3.4}
            ]
        }"#;
        let month: MonthlyConsumption = serde_json::from_str(json).unwrap();
        assert_eq!(month.consumo_total, 42.5);
        assert_eq!(month.datos.len(), 1);
        assert_eq!(month.datos[0].total_dia, 3.4);
        assert_eq!(month.datos[0].hora_pico.as_deref(), Some("8:00:00"));
    }

    #[test]
    fn test_deserialize_year_forecast() {
        let json = r#"{
            "anio": 2025,
            "promedioMensual": 40.5,
            "mesesRegistrados": 5,
            "consumoActual": 202.5,
            "mesesRestantes": 7,
            "estimadoRestante": 283.5,
            "estimadoTotalAnio": 486.0,
            "consumoPorMes": [
                {"mes": "2025-01", "total": 38.0},
                {"mes": "2025-02", "total": 43.0}
            ]
        }"#;
        let forecast: YearForecast = serde_json::from_str(json).unwrap();
        assert_eq!(forecast.anio, 2025);
        assert_eq!(forecast.meses_restantes, 7);
        assert_eq!(forecast.estimado_total_anio, 486.0);
        assert_eq!(forecast.consumo_por_mes[1].mes, "2025-02");
        assert_eq!(forecast.consumo_por_mes[1].total, 43.0);
    }

    #[test]
    fn test_forecast_progress() {
        let forecast = MonthForecast {
            mes: "2025-05".to_string(),
            promedio_diario: 2.0,
            dias_registrados: 10,
            dias_restantes: 21,
            consumo_actual: 20.0,
            estimado_restante: 42.0,
            estimado_total_mes: 62.0,
        };
        assert!((forecast.progress() - 20.0 / 62.0).abs() < 1e-12);

        let empty = MonthForecast {
            estimado_total_mes: 0.0,
            ..forecast
        };
        assert_eq!(empty.progress(), 0.0);
    }

    #[test]
    fn test_latest_reading_is_last_point() {
        let points = vec![
            HourlyReading {
                fecha: "2025-05-01".to_string(),
                hora: "07:00".to_string(),
                lectura: 10.0,
            },
            HourlyReading {
                fecha: "2025-05-01".to_string(),
                hora: "08:00".to_string(),
                lectura: 10.6,
            },
        ];
        assert_eq!(latest_reading(&points).map(|p| p.lectura), Some(10.6));
        assert!(latest_reading(&[]).is_none());
    }
}
