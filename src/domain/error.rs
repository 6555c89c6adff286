// Domain errors for tariff lookup and billing
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BillingError {
    #[error("unknown tariff code: {0}")]
    UnknownTariff(String),

    #[error("consumption {0} m³ is outside the billable range")]
    ConsumptionOutOfRange(f64),

    #[error("amount {0} cannot be represented as currency")]
    UnrepresentableAmount(f64),
}

pub type BillingResult<T> = Result<T, BillingError>;
