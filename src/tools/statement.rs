// src/tools/statement.rs
use crate::provider::{Frequency, MarketDataProvider, StatementColumn, StatementKind};
use crate::symbols::normalize_ticker;
use crate::tool::{ToolError, ToolResult};
use chrono::DateTime;
use log::{info, warn};
use serde_json::{Map, Value};

pub const INVALID_STATEMENT_TYPE: &str =
    "Invalid statement_type. Must be 'income', 'balance', or 'cashflow'.";

/// Income statement, balance sheet or cash flow, keyed by period end.
///
/// `statement_type` is checked before the provider is contacted, so an
/// unknown kind fails the same way for every ticker and frequency.
pub async fn get_financial_statement(
    provider: &dyn MarketDataProvider,
    ticker_symbol: &str,
    statement_type: &str,
    frequency: &str,
) -> ToolResult {
    let symbol = normalize_ticker(ticker_symbol);

    let kind = StatementKind::parse(statement_type)
        .ok_or_else(|| ToolError::Validation(INVALID_STATEMENT_TYPE.to_string()))?;
    let frequency = Frequency::parse(frequency);
    info!("🧾 Fetching {} {} statement for {}", frequency, kind, symbol);

    let columns = provider
        .statement(&symbol, kind, frequency)
        .await
        .map_err(|e| {
            warn!("❌ Statement request for {} failed: {}", symbol, e);
            ToolError::Upstream(format!("An error occurred for ticker '{}': {}", symbol, e))
        })?;

    Ok(Value::Object(statement_to_map(columns)))
}

/// `{"<period end>": {row: value}}`.
pub fn statement_to_map(columns: Vec<StatementColumn>) -> Map<String, Value> {
    columns
        .into_iter()
        .map(|column| (period_key(column.period_end), Value::Object(column.rows)))
        .collect()
}

/// Period end rendered as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn period_key(period_end: i64) -> String {
    DateTime::from_timestamp(period_end, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| period_end.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn period_key_is_a_timestamp_string() {
        assert_eq!(period_key(1711843200), "2024-03-31 00:00:00");
        assert_eq!(period_key(0), "1970-01-01 00:00:00");
    }

    #[test]
    fn columns_become_nested_maps() {
        let columns = vec![
            StatementColumn {
                period_end: 1711843200,
                rows: json!({"totalRevenue": 100}).as_object().cloned().unwrap(),
            },
            StatementColumn {
                period_end: 1680220800,
                rows: json!({"totalRevenue": 90}).as_object().cloned().unwrap(),
            },
        ];
        let map = statement_to_map(columns);
        assert_eq!(map["2024-03-31 00:00:00"]["totalRevenue"], json!(100));
        assert_eq!(map["2023-03-31 00:00:00"]["totalRevenue"], json!(90));
    }
}
