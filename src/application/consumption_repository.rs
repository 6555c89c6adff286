// Repository trait for metered consumption data
use crate::domain::consumption::{
    HourlyReading, MonthForecast, MonthlyConsumption, YearForecast, latest_reading,
};
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait ConsumptionRepository: Send + Sync {
    /// Hourly cumulative readings for one day
    async fn todays_consumption(&self, date: NaiveDate) -> anyhow::Result<Vec<HourlyReading>>;

    /// Daily totals for a calendar month
    async fn monthly_consumption(&self, month: u32, year: i32) -> anyhow::Result<MonthlyConsumption>;

    /// Backend projection for the month in progress
    async fn current_month_forecast(&self) -> anyhow::Result<MonthForecast>;

    /// Backend projection for the year in progress, with per-month totals
    async fn current_year_forecast(&self) -> anyhow::Result<YearForecast>;

    /// Most recent cumulative reading of the day, if the meter reported any
    async fn latest_reading(&self, date: NaiveDate) -> anyhow::Result<Option<HourlyReading>> {
        let points = self.todays_consumption(date).await?;
        Ok(latest_reading(&points).cloned())
    }
}
