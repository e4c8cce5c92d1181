// src/tools/mod.rs
//! Data adapters behind the LLM tools and the REST endpoints. Each operation
//! normalizes its own ticker and turns provider failures into `ToolError`s.
pub mod news;
pub mod price;
pub mod profile;
pub mod ratios;
pub mod statement;

pub use news::get_latest_news;
pub use price::{get_price_earning_data, get_stock_price_data};
pub use profile::get_company_profile;
pub use ratios::scrape_key_ratios;
pub use statement::get_financial_statement;

use crate::provider::InfoMap;
use serde_json::Value;

/// Field from the info snapshot, `null` when the provider did not send it.
pub(crate) fn field(info: &InfoMap, key: &str) -> Value {
    info.get(key).cloned().unwrap_or(Value::Null)
}

/// `currentPrice`, falling back to `regularMarketPrice`. Missing, null and
/// zero prices are all unusable.
pub(crate) fn current_price(info: &InfoMap) -> Option<Value> {
    usable_price(info.get("currentPrice"))
        .or_else(|| usable_price(info.get("regularMarketPrice")))
        .cloned()
}

fn usable_price(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| v.as_f64().map_or(false, |price| price != 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(value: Value) -> InfoMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn current_price_falls_back_to_regular_market_price() {
        let snapshot = info(json!({"currentPrice": 0, "regularMarketPrice": 101.5}));
        assert_eq!(current_price(&snapshot), Some(json!(101.5)));

        let snapshot = info(json!({"currentPrice": null, "regularMarketPrice": 99}));
        assert_eq!(current_price(&snapshot), Some(json!(99)));

        let snapshot = info(json!({"currentPrice": 2500, "regularMarketPrice": 2490}));
        assert_eq!(current_price(&snapshot), Some(json!(2500)));
    }

    #[test]
    fn no_usable_price() {
        assert_eq!(current_price(&info(json!({}))), None);
        assert_eq!(current_price(&info(json!({"regularMarketPrice": 0.0}))), None);
        assert_eq!(current_price(&info(json!({"currentPrice": "n/a"}))), None);
    }

    #[test]
    fn missing_field_is_null() {
        let snapshot = info(json!({"currency": "INR"}));
        assert_eq!(field(&snapshot, "currency"), json!("INR"));
        assert_eq!(field(&snapshot, "dayHigh"), Value::Null);
    }
}
