// Live billing service - Pushes a fresh bill for every new meter reading
use crate::application::billing_service::BillingService;
use crate::application::consumption_repository::ConsumptionRepository;
use crate::domain::error::BillingResult;
use crate::domain::statement::BillingSnapshot;
use crate::domain::tariff::TariffCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 32;

#[derive(Clone)]
pub struct LiveBillingService {
    billing: BillingService,
    repository: Arc<dyn ConsumptionRepository>,
    poll_interval: Duration,
}

impl LiveBillingService {
    pub fn new(
        billing: BillingService,
        repository: Arc<dyn ConsumptionRepository>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            billing,
            repository,
            poll_interval,
        }
    }

    /// Start polling for `code`. The tariff is resolved before anything is
    /// spawned; the poller stops once the receiver is dropped.
    pub fn subscribe(&self, code: TariffCode) -> BillingResult<mpsc::Receiver<BillingSnapshot>> {
        self.billing.tariff(code)?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let billing = self.billing.clone();
        let repository = self.repository.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            let mut last_reading: Option<f64> = None;

            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }

                let today = chrono::Local::now().date_naive();
                let reading = match repository.latest_reading(today).await {
                    Ok(Some(reading)) => reading,
                    Ok(None) => continue,
                    Err(e) => {
                        tracing::warn!("Error fetching latest reading: {:#}", e);
                        continue;
                    }
                };

                if last_reading == Some(reading.lectura) {
                    continue;
                }

                let snapshot = match build_snapshot(&billing, code, reading.hora, reading.lectura) {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        tracing::warn!(tariff = %code, "Skipping reading {}: {}", reading.lectura, e);
                        continue;
                    }
                };

                last_reading = Some(snapshot.reading);
                if tx.send(snapshot).await.is_err() {
                    break;
                }
            }

            tracing::debug!(tariff = %code, "live billing subscriber gone, poller stopped");
        });

        Ok(rx)
    }
}

fn build_snapshot(
    billing: &BillingService,
    code: TariffCode,
    hora: String,
    reading: f64,
) -> BillingResult<BillingSnapshot> {
    Ok(BillingSnapshot {
        tariff: code,
        hora,
        reading,
        total: billing.total_due(reading, code)?,
        range: billing.classify(reading, code)?,
        severity: billing.severity(reading, code)?,
    })
}
