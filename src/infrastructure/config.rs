use crate::domain::tariff::TariffCode;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub billing: BillingSettings,
    #[serde(default)]
    pub live: LiveSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BillingSettings {
    #[serde(default = "default_enabled_tariffs")]
    pub enabled_tariffs: Vec<TariffCode>,
    /// Tariff used when a request does not name one
    #[serde(default)]
    pub default_tariff: TariffCode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LiveSettings {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "https://api-tesis-7k22.onrender.com".to_string()
}

fn default_timeout_secs() -> u64 {
    100
}

fn default_enabled_tariffs() -> Vec<TariffCode> {
    TariffCode::ALL.to_vec()
}

fn default_poll_interval_secs() -> u64 {
    5
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            enabled_tariffs: default_enabled_tariffs(),
            default_tariff: TariffCode::default(),
        }
    }
}

impl Default for LiveSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl ServerSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load `config/app.toml` (optional) overlaid with `WATER_*` environment
/// variables, e.g. `WATER_SERVER__PORT=9000` or
/// `WATER_BILLING__ENABLED_TARIFFS=DA,DB`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(
            config::Environment::with_prefix("WATER")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("billing.enabled_tariffs")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
