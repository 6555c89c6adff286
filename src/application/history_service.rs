// History service - Consumption charts and the yearly forecast
use crate::application::consumption_repository::ConsumptionRepository;
use crate::domain::consumption::YearForecast;
use crate::domain::history::{HourlyChart, MonthlyChart, hourly_chart, monthly_chart};
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct HistoryService {
    repository: Arc<dyn ConsumptionRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn ConsumptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn hourly(&self, date: NaiveDate) -> Result<HourlyChart> {
        let points = self.repository.todays_consumption(date).await?;
        Ok(hourly_chart(&points))
    }

    pub async fn monthly(&self, month: u32, year: i32) -> Result<MonthlyChart> {
        let consumption = self.repository.monthly_consumption(month, year).await?;
        tracing::debug!("Got {} days of consumption for {}/{}", consumption.datos.len(), month, year);
        Ok(monthly_chart(&consumption))
    }

    pub async fn year_forecast(&self) -> Result<YearForecast> {
        self.repository.current_year_forecast().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consumption::{
        DailyConsumption, HourlyReading, MonthForecast, MonthTotal, MonthlyConsumption,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRepository {
        requested_month: Mutex<Option<(u32, i32)>>,
    }

    #[async_trait]
    impl ConsumptionRepository for RecordingRepository {
        async fn todays_consumption(&self, date: NaiveDate) -> Result<Vec<HourlyReading>> {
            let point = |hora: &str, lectura| HourlyReading {
                fecha: date.to_string(),
                hora: hora.to_string(),
                lectura,
            };
            Ok(vec![point("09:00", 3.0), point("08:00", 2.0)])
        }

        async fn monthly_consumption(&self, month: u32, year: i32) -> Result<MonthlyConsumption> {
            *self.requested_month.lock().unwrap() = Some((month, year));
            Ok(MonthlyConsumption {
                consumo_total: 3.0,
                datos: vec![DailyConsumption {
                    fecha: format!("{}-{:02}-01", year, month),
                    hora_pico: None,
                    pico_consumo: 0.5,
                    total_dia: 3.0,
                }],
            })
        }

        async fn current_month_forecast(&self) -> Result<MonthForecast> {
            anyhow::bail!("not used")
        }

        async fn current_year_forecast(&self) -> Result<YearForecast> {
            Ok(YearForecast {
                anio: 2025,
                promedio_mensual: 30.0,
                meses_registrados: 1,
                consumo_actual: 30.0,
                meses_restantes: 11,
                estimado_restante: 330.0,
                estimado_total_anio: 360.0,
                consumo_por_mes: vec![MonthTotal {
                    mes: "2025-01".to_string(),
                    total: 30.0,
                }],
            })
        }
    }

    #[tokio::test]
    async fn test_hourly_chart_from_backend_readings() {
        let service = HistoryService::new(Arc::new(RecordingRepository::default()));
        let date = NaiveDate::from_ymd_opt(2025, 5, 16).unwrap();

        let chart = service.hourly(date).await.unwrap();
        assert_eq!(chart.bars[0].hour, "08:00");
        assert_eq!(chart.bars[1].consumo, 1.0);
        assert_eq!(chart.total, 1.0);
    }

    #[tokio::test]
    async fn test_monthly_chart_requests_given_month() {
        let repository = Arc::new(RecordingRepository::default());
        let service = HistoryService::new(repository.clone());

        let chart = service.monthly(2, 2025).await.unwrap();
        assert_eq!(*repository.requested_month.lock().unwrap(), Some((2, 2025)));
        assert_eq!(chart.days[0].fecha, "2025-02-01");
        assert_eq!(chart.days[0].ma7, None);
        assert_eq!(chart.consumo_total, 3.0);
    }

    #[tokio::test]
    async fn test_year_forecast_passes_through() {
        let service = HistoryService::new(Arc::new(RecordingRepository::default()));
        let forecast = service.year_forecast().await.unwrap();
        assert_eq!(forecast.estimado_total_anio, 360.0);
        assert_eq!(forecast.consumo_por_mes.len(), 1);
    }
}
