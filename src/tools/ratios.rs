// src/tools/ratios.rs
use crate::provider::MarketDataProvider;
use crate::tool::ToolError;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeMap;

static RATIO_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("#top-ratios li").unwrap());
static RATIO_NAME: Lazy<Selector> = Lazy::new(|| Selector::parse(".name").unwrap());
static RATIO_VALUE: Lazy<Selector> = Lazy::new(|| Selector::parse(".value").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Key ratios scraped from the company page, as display strings.
///
/// The ticker is used exactly as given; unlike the other adapters it is not
/// normalized, since the ratios site uses bare exchange codes.
pub async fn scrape_key_ratios(
    provider: &dyn MarketDataProvider,
    ticker: &str,
) -> Result<BTreeMap<String, String>, ToolError> {
    info!("🔎 Scraping key ratios for {}", ticker);

    let html = provider.key_ratios_page(ticker).await.map_err(|e| {
        warn!("❌ Ratios page for {} failed: {}", ticker, e);
        ToolError::Upstream(format!(
            "An error occurred while scraping ratios for ticker '{}': {}",
            ticker, e
        ))
    })?;

    let ratios = extract_key_ratios(&html);
    if ratios.is_empty() {
        return Err(ToolError::NotFound(format!(
            "No key ratios found for ticker '{}'.",
            ticker
        )));
    }
    Ok(ratios)
}

/// Reads `#top-ratios` entries of the form
/// `<li><span class="name">..</span><span class="value">..</span></li>`.
pub fn extract_key_ratios(html: &str) -> BTreeMap<String, String> {
    let document = Html::parse_document(html);
    let mut ratios = BTreeMap::new();

    for item in document.select(&RATIO_ITEM) {
        let name = item.select(&RATIO_NAME).next().map(|el| clean_text(&el.text().collect::<String>()));
        let value = item.select(&RATIO_VALUE).next().map(|el| clean_text(&el.text().collect::<String>()));

        if let (Some(name), Some(value)) = (name, value) {
            if !name.is_empty() {
                ratios.insert(name, value);
            }
        }
    }
    ratios
}

fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}
