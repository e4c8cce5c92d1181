//! Shared fixtures for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use sirius_finance::error::SiriusError;
use sirius_finance::provider::{Frequency, InfoMap, MarketDataProvider, StatementColumn, StatementKind};
use std::sync::Mutex;

/// In-memory provider that records every request it receives.
#[derive(Default)]
pub struct StubProvider {
    info: InfoMap,
    statement: Vec<StatementColumn>,
    news: Vec<Value>,
    ratios_page: String,
    failure: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info(mut self, info: Value) -> Self {
        self.info = info.as_object().cloned().expect("info must be a JSON object");
        self
    }

    pub fn with_statement(mut self, columns: Vec<StatementColumn>) -> Self {
        self.statement = columns;
        self
    }

    pub fn with_news(mut self, news: Vec<Value>) -> Self {
        self.news = news;
        self
    }

    pub fn with_ratios_page(mut self, html: &str) -> Self {
        self.ratios_page = html.to_string();
        self
    }

    /// Every call fails as if the upstream returned 503.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: String) -> Result<(), SiriusError> {
        self.requests.lock().unwrap().push(request);
        match &self.failure {
            Some(message) => Err(SiriusError::Upstream {
                status: 503,
                body: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn info(&self, symbol: &str) -> Result<InfoMap, SiriusError> {
        self.record(format!("info:{}", symbol))?;
        Ok(self.info.clone())
    }

    async fn statement(
        &self,
        symbol: &str,
        kind: StatementKind,
        frequency: Frequency,
    ) -> Result<Vec<StatementColumn>, SiriusError> {
        self.record(format!("statement:{}:{}:{}", symbol, kind, frequency))?;
        Ok(self.statement.clone())
    }

    async fn news(&self, symbol: &str) -> Result<Vec<Value>, SiriusError> {
        self.record(format!("news:{}", symbol))?;
        Ok(self.news.clone())
    }

    async fn key_ratios_page(&self, ticker: &str) -> Result<String, SiriusError> {
        self.record(format!("ratios:{}", ticker))?;
        Ok(self.ratios_page.clone())
    }
}

pub fn reliance_info() -> Value {
    json!({
        "shortName": "RELIANCE INDUSTRIES LTD",
        "currentPrice": 2500,
        "currency": "INR",
        "previousClose": 2480.5,
        "dayHigh": 2510.0,
        "dayLow": 2475.25,
        "fiftyTwoWeekHigh": 3024.9,
        "fiftyTwoWeekLow": 2220.3,
        "trailingPE": 24.7,
        "forwardPE": 21.3,
        "longName": "Reliance Industries Limited",
        "sector": "Energy",
        "industry": "Oil & Gas Refining & Marketing",
        "fullTimeEmployees": 347362,
        "longBusinessSummary": "Reliance Industries Limited engages in hydrocarbon exploration.",
        "website": "https://www.ril.com",
        "city": "Mumbai",
        "country": "India"
    })
}

pub const RATIOS_PAGE: &str = r#"
<html><body>
  <ul id="top-ratios">
    <li><span class="name">Market Cap</span><span class="nowrap value">₹ <span class="number">16,91,000</span> Cr.</span></li>
    <li><span class="name">Stock P/E</span><span class="nowrap value"><span class="number">24.7</span></span></li>
    <li><span class="name">ROE</span><span class="nowrap value"><span class="number">9.25</span> %</span></li>
  </ul>
</body></html>
"#;

/// A chat-completions body whose first choice proposes the given calls.
pub fn completion_with_tool_calls(calls: &[(&str, &str)]) -> String {
    let tool_calls: Vec<Value> = calls
        .iter()
        .enumerate()
        .map(|(i, (name, arguments))| {
            json!({
                "id": format!("call_{}", i + 1),
                "type": "function",
                "function": {"name": name, "arguments": arguments}
            })
        })
        .collect();

    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": null, "tool_calls": tool_calls},
            "finish_reason": "tool_calls"
        }]
    })
    .to_string()
}

pub fn completion_with_text(text: &str) -> String {
    json!({
        "id": "chatcmpl-2",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
