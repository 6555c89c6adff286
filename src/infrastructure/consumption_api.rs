// HTTP client for the metering backend
use crate::application::consumption_repository::ConsumptionRepository;
use crate::domain::consumption::{HourlyReading, MonthForecast, MonthlyConsumption, YearForecast};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsumptionApiError {
    #[error("Error de conexión al llamar a {endpoint}")]
    Connection { endpoint: String },

    #[error("La solicitud a {endpoint} tardó demasiado en responder")]
    Timeout { endpoint: String },

    #[error("{message} (HTTP {status} en {endpoint})")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Respuesta inválida de {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone)]
pub struct HttpConsumptionRepository {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct TodaysConsumptionPayload {
    fecha: String,
}

#[derive(Debug, Serialize)]
struct MonthlyConsumptionPayload {
    mes: u32,
    anio: i32,
}

#[derive(Debug, Deserialize)]
struct TodaysConsumptionResponse {
    #[allow(dead_code)]
    #[serde(default)]
    mensaje: String,
    #[serde(default)]
    datos: Vec<HourlyReading>,
}

#[derive(Debug, Deserialize)]
struct MonthlyConsumptionResponse {
    #[allow(dead_code)]
    #[serde(default)]
    mensaje: String,
    datos: MonthlyConsumption,
}

#[derive(Debug, Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

impl HttpConsumptionRepository {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for the consumption backend")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ConsumptionApiError> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(path, request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConsumptionApiError> {
        let request = self.client.get(self.url(path));
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ConsumptionApiError> {
        let response = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Error {} en endpoint: {}", status.as_u16(), endpoint);
            tracing::debug!("Error body: {}", body);

            return Err(ConsumptionApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: status_message(status.as_u16(), &body),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ConsumptionApiError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })
    }
}

fn transport_error(endpoint: &str, error: reqwest::Error) -> ConsumptionApiError {
    let endpoint = endpoint.to_string();
    if error.is_timeout() {
        tracing::error!("Timeout en la solicitud al endpoint: {}", endpoint);
        ConsumptionApiError::Timeout { endpoint }
    } else {
        tracing::error!("Error de red al llamar a {}: {}", endpoint, error);
        ConsumptionApiError::Connection { endpoint }
    }
}

/// User-facing message for a failed backend call. Conflicts carry the
/// server's own message.
fn status_message(status: u16, body: &str) -> String {
    match status {
        409 => serde_json::from_str::<ServerMessage>(body)
            .ok()
            .and_then(|m| m.message)
            .unwrap_or_else(|| "Error del servidor".to_string()),
        400 => "Solicitud incorrecta".to_string(),
        401 => "No autorizado".to_string(),
        403 => "Acceso prohibido".to_string(),
        404 => "No encontrado".to_string(),
        500 => "Error del servidor".to_string(),
        _ => "Error desconocido".to_string(),
    }
}

#[async_trait]
impl ConsumptionRepository for HttpConsumptionRepository {
    async fn todays_consumption(&self, date: NaiveDate) -> Result<Vec<HourlyReading>> {
        let payload = TodaysConsumptionPayload {
            fecha: date.format("%Y-%m-%d").to_string(),
        };
        let response: TodaysConsumptionResponse = self.post("/consumo/hoy", &payload).await?;

        tracing::debug!("Got {} hourly readings for {}", response.datos.len(), date);
        Ok(response.datos)
    }

    async fn monthly_consumption(&self, month: u32, year: i32) -> Result<MonthlyConsumption> {
        let payload = MonthlyConsumptionPayload {
            mes: month,
            anio: year,
        };
        let response: MonthlyConsumptionResponse = self.post("/consumo/mes", &payload).await?;
        Ok(response.datos)
    }

    async fn current_month_forecast(&self) -> Result<MonthForecast> {
        Ok(self.get("/consumo/pronostico-mes-actual").await?)
    }

    async fn current_year_forecast(&self) -> Result<YearForecast> {
        let forecast: YearForecast = self.get("/consumo/pronostico-anual").await?;
        tracing::debug!(
            "Year forecast for {}: {} months on record",
            forecast.anio,
            forecast.consumo_por_mes.len()
        );
        Ok(forecast)
    }
}
