// Dashboard service - Use case for the home dashboard of a tariff
use crate::application::billing_service::BillingService;
use crate::application::consumption_repository::ConsumptionRepository;
use crate::domain::consumption::MonthForecast;
use crate::domain::error::BillingResult;
use crate::domain::insight::month_status;
use crate::domain::statement::{DashboardSummary, Projection, Statement};
use crate::domain::tariff::TariffCode;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    billing: BillingService,
    repository: Arc<dyn ConsumptionRepository>,
}

impl DashboardService {
    pub fn new(billing: BillingService, repository: Arc<dyn ConsumptionRepository>) -> Self {
        Self {
            billing,
            repository,
        }
    }

    /// Current bill and month-end projection. A backend failure or an
    /// unbillable backend value drops only the affected section; an
    /// unconfigured tariff fails the whole dashboard.
    pub async fn get_dashboard(
        &self,
        code: TariffCode,
        today: NaiveDate,
    ) -> BillingResult<DashboardSummary> {
        let tariff = self.billing.tariff(code)?;
        let title = format!("{} - {}", tariff.label, today.format("%m/%Y"));

        let current = self.fetch_current(code, today).await;
        let projected = self.fetch_projection(code).await;

        Ok(DashboardSummary {
            title,
            tariff: code,
            current,
            projected,
        })
    }

    async fn fetch_current(&self, code: TariffCode, today: NaiveDate) -> Option<Statement> {
        let month = match self
            .repository
            .monthly_consumption(today.month(), today.year())
            .await
        {
            Ok(month) => month,
            Err(e) => {
                tracing::warn!("Error fetching monthly consumption for {}: {:#}", today, e);
                return None;
            }
        };

        match self.billing.statement(month.consumo_total, code) {
            Ok(statement) => Some(statement),
            Err(e) => {
                tracing::warn!(tariff = %code, "Dropping current bill: {}", e);
                None
            }
        }
    }

    async fn fetch_projection(&self, code: TariffCode) -> Option<Projection> {
        let forecast = match self.repository.current_month_forecast().await {
            Ok(forecast) => forecast,
            Err(e) => {
                tracing::warn!("Error fetching month forecast: {:#}", e);
                return None;
            }
        };

        match self.project(&forecast, code) {
            Ok(projection) => Some(projection),
            Err(e) => {
                tracing::warn!(tariff = %code, "Dropping month projection: {}", e);
                None
            }
        }
    }

    fn project(&self, forecast: &MonthForecast, code: TariffCode) -> BillingResult<Projection> {
        let consumption = forecast.estimado_total_mes;
        let status = month_status(
            forecast.progress(),
            forecast.dias_registrados,
            forecast.dias_restantes,
        );

        Ok(Projection {
            consumption,
            total: self.billing.total_due(consumption, code)?,
            severity: self.billing.severity(consumption, code)?,
            status,
            status_label: status.label(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consumption::{HourlyReading, MonthlyConsumption, YearForecast};
    use crate::domain::error::BillingError;
    use crate::domain::insight::MonthStatus;
    use crate::infrastructure::tariff_table::StaticTariffTable;
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    struct FakeRepository {
        month: Option<MonthlyConsumption>,
        forecast: Option<MonthForecast>,
    }

    #[async_trait]
    impl ConsumptionRepository for FakeRepository {
        async fn todays_consumption(&self, _date: NaiveDate) -> anyhow::Result<Vec<HourlyReading>> {
            Ok(Vec::new())
        }

        async fn monthly_consumption(&self, _month: u32, _year: i32) -> anyhow::Result<MonthlyConsumption> {
            self.month
                .clone()
                .ok_or_else(|| anyhow::anyhow!("Error del servidor"))
        }

        async fn current_month_forecast(&self) -> anyhow::Result<MonthForecast> {
            self.forecast
                .clone()
                .ok_or_else(|| anyhow::anyhow!("No encontrado"))
        }

        async fn current_year_forecast(&self) -> anyhow::Result<YearForecast> {
            anyhow::bail!("not used")
        }
    }

    fn forecast() -> MonthForecast {
        MonthForecast {
            mes: "2025-05".to_string(),
            promedio_diario: 1.0,
            dias_registrados: 15,
            dias_restantes: 15,
            consumo_actual: 10.0,
            estimado_restante: 10.0,
            estimado_total_mes: 20.0,
        }
    }

    fn dashboard(repository: FakeRepository, enabled: Vec<TariffCode>) -> DashboardService {
        let billing = BillingService::new(Arc::new(StaticTariffTable::new(enabled)));
        DashboardService::new(billing, Arc::new(repository))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 16).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_with_all_sections() {
        let service = dashboard(
            FakeRepository {
                month: Some(MonthlyConsumption {
                    consumo_total: 10.0,
                    datos: Vec::new(),
                }),
                forecast: Some(forecast()),
            },
            TariffCode::ALL.to_vec(),
        );

        let summary = service.get_dashboard(TariffCode::DA, today()).await.unwrap();
        assert_eq!(summary.title, "Doméstica A - 05/2025");

        let current = summary.current.unwrap();
        assert_eq!(current.total, Decimal::new(2342, 2));

        let projected = summary.projected.unwrap();
        assert_eq!(projected.total, Decimal::new(3556, 2));
        // half the days gone, half the projected volume used
        assert_eq!(projected.status, MonthStatus::OnTrack);
        assert_eq!(projected.status_label, "A tiempo");
    }

    #[tokio::test]
    async fn test_backend_failure_drops_section() {
        let service = dashboard(
            FakeRepository {
                month: None,
                forecast: Some(forecast()),
            },
            TariffCode::ALL.to_vec(),
        );

        let summary = service.get_dashboard(TariffCode::DA, today()).await.unwrap();
        assert!(summary.current.is_none());
        assert!(summary.projected.is_some());
    }

    #[tokio::test]
    async fn test_unbillable_backend_value_drops_section() {
        let service = dashboard(
            FakeRepository {
                month: Some(MonthlyConsumption {
                    consumo_total: 5e25,
                    datos: Vec::new(),
                }),
                forecast: Some(MonthForecast {
                    estimado_total_mes: 1e30,
                    ..forecast()
                }),
            },
            TariffCode::ALL.to_vec(),
        );

        let summary = service.get_dashboard(TariffCode::DA, today()).await.unwrap();
        assert_eq!(summary.title, "Doméstica A - 05/2025");
        assert!(summary.current.is_none());
        assert!(summary.projected.is_none());
    }

    #[tokio::test]
    async fn test_unknown_tariff_fails_dashboard() {
        let service = dashboard(
            FakeRepository {
                month: None,
                forecast: None,
            },
            vec![TariffCode::R],
        );

        let result = service.get_dashboard(TariffCode::DA, today()).await;
        assert_eq!(result, Err(BillingError::UnknownTariff("DA".to_string())));
    }
}
