// src/tools/profile.rs
use super::field;
use crate::provider::MarketDataProvider;
use crate::symbols::normalize_ticker;
use crate::tool::{ToolError, ToolResult};
use log::{info, warn};
use serde_json::json;

/// Descriptive company fields: name, sector, industry, headcount, summary,
/// website and location.
pub async fn get_company_profile(provider: &dyn MarketDataProvider, ticker_symbol: &str) -> ToolResult {
    let symbol = normalize_ticker(ticker_symbol);
    info!("🏢 Fetching company profile for {}", symbol);

    let snapshot = provider.info(&symbol).await.map_err(|e| {
        warn!("❌ Profile request for {} failed: {}", symbol, e);
        ToolError::Upstream(format!("An error occurred for ticker '{}': {}", symbol, e))
    })?;

    Ok(json!({
        "longName": field(&snapshot, "longName"),
        "sector": field(&snapshot, "sector"),
        "industry": field(&snapshot, "industry"),
        "fullTimeEmployees": field(&snapshot, "fullTimeEmployees"),
        "longBusinessSummary": field(&snapshot, "longBusinessSummary"),
        "website": field(&snapshot, "website"),
        "city": field(&snapshot, "city"),
        "country": field(&snapshot, "country"),
    }))
}
