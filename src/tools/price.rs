// src/tools/price.rs
use super::{current_price, field};
use crate::error::SiriusError;
use crate::provider::MarketDataProvider;
use crate::symbols::normalize_ticker;
use crate::tool::{ToolError, ToolResult};
use log::{info, warn};
use serde_json::json;

/// Latest price and trading range for a ticker.
pub async fn get_stock_price_data(provider: &dyn MarketDataProvider, ticker_symbol: &str) -> ToolResult {
    let symbol = normalize_ticker(ticker_symbol);
    info!("📈 Fetching price data for {}", symbol);

    let snapshot = provider
        .info(&symbol)
        .await
        .map_err(|e| provider_error(&symbol, e))?;

    let current_price = current_price(&snapshot).ok_or_else(|| price_not_found(&symbol))?;

    Ok(json!({
        "shortName": field(&snapshot, "shortName"),
        "symbol": symbol,
        "currentPrice": current_price,
        "currency": field(&snapshot, "currency"),
        "previousClose": field(&snapshot, "previousClose"),
        "dayHigh": field(&snapshot, "dayHigh"),
        "dayLow": field(&snapshot, "dayLow"),
        "fiftyTwoWeekHigh": field(&snapshot, "fiftyTwoWeekHigh"),
        "fiftyTwoWeekLow": field(&snapshot, "fiftyTwoWeekLow"),
        "TrailingPE": field(&snapshot, "trailingPE"),
    }))
}

/// Trailing and forward P/E for a ticker.
///
/// Shares the price guard with [`get_stock_price_data`]: a ticker without a
/// usable price is reported as not found even if P/E data exists.
pub async fn get_price_earning_data(provider: &dyn MarketDataProvider, ticker_symbol: &str) -> ToolResult {
    let symbol = normalize_ticker(ticker_symbol);
    info!("📊 Fetching P/E data for {}", symbol);

    let snapshot = provider
        .info(&symbol)
        .await
        .map_err(|e| provider_error(&symbol, e))?;

    if current_price(&snapshot).is_none() {
        return Err(price_not_found(&symbol));
    }

    Ok(json!({
        "shortName": field(&snapshot, "shortName"),
        "symbol": symbol,
        "TrailingPE": field(&snapshot, "trailingPE"),
        "ForwardPE": field(&snapshot, "forwardPE"),
    }))
}

fn price_not_found(symbol: &str) -> ToolError {
    warn!("No usable price for {}", symbol);
    ToolError::NotFound(format!(
        "Could not retrieve price for {}. It might be an invalid ticker or delisted.",
        symbol
    ))
}

fn provider_error(symbol: &str, err: SiriusError) -> ToolError {
    warn!("❌ Market data request for {} failed: {}", symbol, err);
    ToolError::Upstream(format!(
        "An error occurred with the market data provider for ticker '{}': {}",
        symbol, err
    ))
}
