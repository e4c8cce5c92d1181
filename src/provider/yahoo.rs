// src/provider/yahoo.rs
use super::{Frequency, InfoMap, StatementColumn, StatementKind};
use crate::error::SiriusError;
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::{Map, Value};
use tokio::sync::OnceCell;

/// quoteSummary modules merged into the info snapshot, in precedence order.
pub const INFO_MODULES: &str = "price,summaryDetail,defaultKeyStatistics,financialData,assetProfile";

const NEWS_COUNT: &str = "10";

/// quoteSummary needs a session cookie plus the crumb tied to it. `http`
/// must keep cookies (see `provider::build_http_client`) for the handshake
/// to work against the live service.
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    base_url: String,
    cookie_url: String,
    http: Client,
    crumb: OnceCell<String>,
}

impl YahooFinanceClient {
    pub fn new(base_url: &str, cookie_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie_url: cookie_url.to_string(),
            http,
            crumb: OnceCell::new(),
        }
    }

    pub async fn info(&self, symbol: &str) -> Result<InfoMap, SiriusError> {
        let result = self.quote_summary(symbol, INFO_MODULES).await?;
        Ok(flatten_modules(&result, INFO_MODULES.split(',')))
    }

    pub async fn statement(
        &self,
        symbol: &str,
        kind: StatementKind,
        frequency: Frequency,
    ) -> Result<Vec<StatementColumn>, SiriusError> {
        let (module, list_key) = statement_module(kind, frequency);
        let result = self.quote_summary(symbol, module).await?;

        let entries = result
            .get(module)
            .and_then(|m| m.get(list_key))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                SiriusError::InvalidResponse(format!("No {} {} statement for {}", frequency, kind, symbol))
            })?;

        entries.iter().map(statement_column).collect()
    }

    pub async fn news(&self, symbol: &str) -> Result<Vec<Value>, SiriusError> {
        let url = format!("{}/v1/finance/search", self.base_url);
        debug!("Fetching news for {}", symbol);

        let response = self
            .http
            .get(&url)
            .query(&[("q", symbol), ("quotesCount", "0"), ("newsCount", NEWS_COUNT)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SiriusError::Upstream { status: status.as_u16(), body });
        }

        let body: Value = response.json().await?;
        Ok(body
            .get("news")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    /// Fetched on first use and reused afterwards. A failed handshake is not
    /// cached, so the next request tries again.
    async fn crumb(&self) -> Result<&str, SiriusError> {
        self.crumb
            .get_or_try_init(|| self.fetch_crumb())
            .await
            .map(String::as_str)
    }

    async fn fetch_crumb(&self) -> Result<String, SiriusError> {
        // The cookie endpoint answers 404 while still setting the cookie.
        let cookie_response = self.http.get(&self.cookie_url).send().await?;
        debug!("Cookie handshake with {} returned {}", self.cookie_url, cookie_response.status());

        let response = self
            .http
            .get(format!("{}/v1/test/getcrumb", self.base_url))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!("Crumb request failed with {}: {}", status, text);
            return Err(SiriusError::Upstream { status: status.as_u16(), body: text });
        }

        let crumb = text.trim();
        if crumb.is_empty() {
            return Err(SiriusError::InvalidResponse("Yahoo Finance returned an empty crumb".to_string()));
        }
        info!("🔑 Obtained Yahoo Finance crumb");
        Ok(crumb.to_string())
    }

    /// Returns `quoteSummary.result[0]` for the requested modules.
    async fn quote_summary(&self, symbol: &str, modules: &str) -> Result<Map<String, Value>, SiriusError> {
        let crumb = self.crumb().await?;
        let url = format!(
            "{}/v10/finance/quoteSummary/{}",
            self.base_url,
            urlencoding::encode(symbol)
        );
        debug!("quoteSummary {} modules={}", symbol, modules);

        let response = self
            .http
            .get(&url)
            .query(&[("modules", modules), ("crumb", crumb)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| error_description(&v))
                .unwrap_or(text);
            warn!("quoteSummary for {} failed with {}: {}", symbol, status, body);
            return Err(SiriusError::Upstream { status: status.as_u16(), body });
        }

        let body: Value = response.json().await?;
        if let Some(description) = error_description(&body) {
            return Err(SiriusError::InvalidResponse(description));
        }

        body.get("quoteSummary")
            .and_then(|q| q.get("result"))
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| SiriusError::InvalidResponse(format!("No data returned for {}", symbol)))
    }
}

/// Reads `quoteSummary.error`, or `finance.error` as sent with auth failures.
fn error_description(body: &Value) -> Option<String> {
    let error = body
        .get("quoteSummary")
        .or_else(|| body.get("finance"))?
        .get("error")?;
    if error.is_null() {
        return None;
    }
    Some(
        error
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
    )
}

/// Module and list key holding the periods for each of the six data sets.
pub fn statement_module(kind: StatementKind, frequency: Frequency) -> (&'static str, &'static str) {
    match (kind, frequency) {
        (StatementKind::Income, Frequency::Annual) => ("incomeStatementHistory", "incomeStatementHistory"),
        (StatementKind::Income, Frequency::Quarterly) => {
            ("incomeStatementHistoryQuarterly", "incomeStatementHistory")
        }
        (StatementKind::Balance, Frequency::Annual) => ("balanceSheetHistory", "balanceSheetStatements"),
        (StatementKind::Balance, Frequency::Quarterly) => {
            ("balanceSheetHistoryQuarterly", "balanceSheetStatements")
        }
        (StatementKind::Cashflow, Frequency::Annual) => ("cashflowStatementHistory", "cashflowStatements"),
        (StatementKind::Cashflow, Frequency::Quarterly) => {
            ("cashflowStatementHistoryQuarterly", "cashflowStatements")
        }
    }
}

/// Merges the fields of each module into one map. Earlier modules win on
/// duplicate keys; `{raw, fmt}` wrappers collapse to `raw`.
pub fn flatten_modules<'a>(
    result: &Map<String, Value>,
    modules: impl IntoIterator<Item = &'a str>,
) -> InfoMap {
    let mut info = Map::new();
    for module in modules {
        let Some(fields) = result.get(module).and_then(Value::as_object) else {
            continue;
        };
        for (key, value) in fields {
            if key == "maxAge" || info.contains_key(key) {
                continue;
            }
            if let Some(value) = flatten_value(value) {
                info.insert(key.clone(), value);
            }
        }
    }
    info
}

/// `None` for the empty objects Yahoo uses to mark a missing value.
pub fn flatten_value(value: &Value) -> Option<Value> {
    match value {
        Value::Object(obj) if obj.is_empty() => None,
        Value::Object(obj) => match obj.get("raw") {
            Some(raw) => Some(raw.clone()),
            None => Some(value.clone()),
        },
        other => Some(other.clone()),
    }
}

fn statement_column(entry: &Value) -> Result<StatementColumn, SiriusError> {
    let fields = entry
        .as_object()
        .ok_or_else(|| SiriusError::InvalidResponse("Statement entry is not an object".into()))?;

    let period_end = fields
        .get("endDate")
        .and_then(flatten_value)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| SiriusError::InvalidResponse("Statement entry has no endDate".into()))?;

    let rows = fields
        .iter()
        .filter(|(key, _)| key.as_str() != "maxAge" && key.as_str() != "endDate")
        .filter_map(|(key, value)| flatten_value(value).map(|v| (key.clone(), v)))
        .collect();

    Ok(StatementColumn { period_end, rows })
}
