// src/config.rs
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo";
pub const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://query2.finance.yahoo.com";
/// Sets the session cookie Yahoo requires before it hands out a crumb.
pub const DEFAULT_MARKET_DATA_COOKIE_URL: &str = "https://fc.yahoo.com";
pub const DEFAULT_RATIOS_BASE_URL: &str = "https://www.screener.in";

#[derive(Clone, Debug)]
pub struct SiriusConfig {
    /// Missing key is not fatal: the chat path reports a configuration error instead.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub market_data_base_url: String,
    pub market_data_cookie_url: String,
    pub ratios_base_url: String,
    pub host: String,
    pub port: u16,
    pub request_timeout: Option<Duration>,
}

impl Default for SiriusConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            market_data_base_url: DEFAULT_MARKET_DATA_BASE_URL.to_string(),
            market_data_cookie_url: DEFAULT_MARKET_DATA_COOKIE_URL.to_string(),
            ratios_base_url: DEFAULT_RATIOS_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout: None,
        }
    }
}

impl SiriusConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", raw))?,
            Err(_) => defaults.port,
        };

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse::<u64>().with_context(|| {
                format!("REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'", raw)
            })?)),
            Err(_) => None,
        };

        let config = Self {
            openai_api_key,
            openai_base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_model: env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            market_data_base_url: env::var("MARKET_DATA_BASE_URL")
                .unwrap_or(defaults.market_data_base_url),
            market_data_cookie_url: env::var("MARKET_DATA_COOKIE_URL")
                .unwrap_or(defaults.market_data_cookie_url),
            ratios_base_url: env::var("RATIOS_BASE_URL").unwrap_or(defaults.ratios_base_url),
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            request_timeout,
        };

        config.validate()?;
        Ok(config)
    }

    /// Rejects base URLs that cannot be parsed.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("OPENAI_BASE_URL", &self.openai_base_url),
            ("MARKET_DATA_BASE_URL", &self.market_data_base_url),
            ("MARKET_DATA_COOKIE_URL", &self.market_data_cookie_url),
            ("RATIOS_BASE_URL", &self.ratios_base_url),
        ] {
            Url::parse(value).with_context(|| format!("{} is not a valid URL: '{}'", name, value))?;
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
