// src/provider/mod.rs
//! Market-data sources consumed by the tool adapters.
//!
//! `MarketDataProvider` is the seam between the adapters and the outside
//! world. `HttpMarketData` is the production implementation: Yahoo Finance
//! JSON endpoints for quotes, statements and news, plus an HTML key-ratios
//! page for the REST ratios endpoint.

pub mod screener;
pub mod yahoo;

use crate::config::SiriusConfig;
use crate::error::SiriusError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use std::fmt;

pub use screener::ScreenerClient;
pub use yahoo::YahooFinanceClient;

pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Flat snapshot of quote, statistics and profile fields for one symbol.
pub type InfoMap = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Income,
    Balance,
    Cashflow,
}

impl StatementKind {
    /// Case-insensitive parse; `None` for anything outside the three kinds.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "balance" => Some(Self::Balance),
            "cashflow" => Some(Self::Cashflow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Balance => "balance",
            Self::Cashflow => "cashflow",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Annual,
    Quarterly,
}

impl Frequency {
    /// `annual` (any case) is annual; every other value selects quarterly.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("annual") {
            Self::Annual
        } else {
            Self::Quarterly
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reporting period of a financial statement.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementColumn {
    /// Period end as a unix timestamp (seconds).
    pub period_end: i64,
    pub rows: Map<String, Value>,
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Quote, key statistics and company profile fields merged into one map.
    async fn info(&self, symbol: &str) -> Result<InfoMap, SiriusError>;

    /// One of the six statement data sets, newest period first.
    async fn statement(
        &self,
        symbol: &str,
        kind: StatementKind,
        frequency: Frequency,
    ) -> Result<Vec<StatementColumn>, SiriusError>;

    async fn news(&self, symbol: &str) -> Result<Vec<Value>, SiriusError>;

    /// Raw HTML of the key-ratios page for the ticker as given.
    async fn key_ratios_page(&self, ticker: &str) -> Result<String, SiriusError>;
}

/// Production provider combining Yahoo Finance with the key-ratios site.
pub struct HttpMarketData {
    yahoo: YahooFinanceClient,
    screener: ScreenerClient,
}

impl HttpMarketData {
    pub fn new(yahoo: YahooFinanceClient, screener: ScreenerClient) -> Self {
        Self { yahoo, screener }
    }

    pub fn from_config(config: &SiriusConfig) -> Result<Self, SiriusError> {
        let http = build_http_client(config)?;
        Ok(Self::new(
            YahooFinanceClient::new(&config.market_data_base_url, &config.market_data_cookie_url, http.clone()),
            ScreenerClient::new(&config.ratios_base_url, http),
        ))
    }
}

#[async_trait]
impl MarketDataProvider for HttpMarketData {
    async fn info(&self, symbol: &str) -> Result<InfoMap, SiriusError> {
        self.yahoo.info(symbol).await
    }

    async fn statement(
        &self,
        symbol: &str,
        kind: StatementKind,
        frequency: Frequency,
    ) -> Result<Vec<StatementColumn>, SiriusError> {
        self.yahoo.statement(symbol, kind, frequency).await
    }

    async fn news(&self, symbol: &str) -> Result<Vec<Value>, SiriusError> {
        self.yahoo.news(symbol).await
    }

    async fn key_ratios_page(&self, ticker: &str) -> Result<String, SiriusError> {
        self.screener.key_ratios_page(ticker).await
    }
}

/// Shared by the market-data and model clients. Keeps cookies for the Yahoo
/// crumb handshake and applies `REQUEST_TIMEOUT_SECS` when set.
pub fn build_http_client(config: &SiriusConfig) -> Result<Client, SiriusError> {
    let mut builder = Client::builder().user_agent(USER_AGENT).cookie_store(true);
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
