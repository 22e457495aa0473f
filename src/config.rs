use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API base URL: {0:?}")]
    InvalidBaseUrl(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_login_url")]
    pub login_url: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u32,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_login_url() -> String {
    "/login".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_toast_duration_ms() -> u32 {
    4000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            login_url: default_login_url(),
            currency_symbol: default_currency_symbol(),
            toast_duration_ms: default_toast_duration_ms(),
        }
    }
}

impl AppConfig {
    /// Reads the values baked in at build time (`API_BASE_URL`,
    /// `ADMIN_LOGIN_URL`, `CURRENCY_SYMBOL`), falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("API_BASE_URL")
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url),
            login_url: option_env!("ADMIN_LOGIN_URL")
                .map(str::to_string)
                .unwrap_or(defaults.login_url),
            currency_symbol: option_env!("CURRENCY_SYMBOL")
                .map(str::to_string)
                .unwrap_or(defaults.currency_symbol),
            toast_duration_ms: defaults.toast_duration_ms,
        }
        .validate()
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?
            .validate()
    }

    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let url = self.api_base_url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url));
        }
        self.api_base_url = url.to_string();
        Ok(self)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format_money(&self.currency_symbol, amount)
    }
}

/// Whole amounts without decimals, anything else with two.
pub fn format_money(symbol: &str, amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}{:.0}", symbol, amount)
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}
