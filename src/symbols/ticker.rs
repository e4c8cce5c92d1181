// src/symbols/ticker.rs

/// Suffix appended to tickers that carry no exchange marker (NSE).
pub const DEFAULT_MARKET_SUFFIX: &str = ".NS";

/// Exchange markers that are recognized as already present (NSE, BSE).
pub const RECOGNIZED_MARKET_SUFFIXES: [&str; 2] = [".NS", ".BO"];

/// Returns the ticker with the default NSE suffix appended, unless it already
/// contains one of the recognized exchange markers.
///
/// The check is case-insensitive but the input is otherwise returned as given,
/// so `reliance` becomes `reliance.NS` and `TCS.BO` is left alone.
///
/// # Arguments
///
/// * `ticker` - A ticker symbol such as `RELIANCE` or `RELIANCE.NS`.
pub fn normalize_ticker(ticker: &str) -> String {
    if has_market_suffix(ticker) {
        ticker.to_string()
    } else {
        format!("{}{}", ticker, DEFAULT_MARKET_SUFFIX)
    }
}

pub fn has_market_suffix(ticker: &str) -> bool {
    let upper = ticker.to_uppercase();
    RECOGNIZED_MARKET_SUFFIXES
        .iter()
        .any(|suffix| upper.contains(suffix))
}
