// HTTP error mapping
use crate::domain::error::BillingError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error("{0}")]
    BadRequest(String),

    /// Metering backend unreachable or answering with an error
    #[error("{0}")]
    Backend(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn backend(error: anyhow::Error) -> Self {
        tracing::warn!("Backend request failed: {:#}", error);
        ApiError::Backend(format!("{:#}", error))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Billing(BillingError::UnknownTariff(_)) => StatusCode::NOT_FOUND,
            ApiError::Billing(
                BillingError::ConsumptionOutOfRange(_) | BillingError::UnrepresentableAmount(_),
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), "request failed: {}", self);

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
