// src/tools/news.rs
use crate::provider::MarketDataProvider;
use crate::symbols::normalize_ticker;
use crate::tool::{ToolError, ToolResult};
use log::{info, warn};
use serde_json::{json, Value};

pub const NO_NEWS_MESSAGE: &str = "No recent news found.";

/// Latest articles as returned by the provider, or a single placeholder
/// record when there are none.
pub async fn get_latest_news(provider: &dyn MarketDataProvider, ticker_symbol: &str) -> ToolResult {
    let symbol = normalize_ticker(ticker_symbol);
    info!("📰 Fetching latest news for {}", symbol);

    let articles = provider.news(&symbol).await.map_err(|e| {
        warn!("❌ News request for {} failed: {}", symbol, e);
        ToolError::Upstream(format!("An error occurred for ticker '{}': {}", symbol, e))
    })?;

    if articles.is_empty() {
        return Ok(json!([{ "message": NO_NEWS_MESSAGE }]));
    }
    Ok(Value::Array(articles))
}
