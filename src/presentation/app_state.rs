// Application state for HTTP handlers
use crate::application::billing_service::BillingService;
use crate::application::dashboard_service::DashboardService;
use crate::application::history_service::HistoryService;
use crate::application::streaming_service::LiveBillingService;
use crate::domain::tariff::TariffCode;

#[derive(Clone)]
pub struct AppState {
    pub billing_service: BillingService,
    pub dashboard_service: DashboardService,
    pub history_service: HistoryService,
    pub live_service: LiveBillingService,
    /// Selection used by routes that do not name a tariff
    pub default_tariff: TariffCode,
}
