// src/provider/screener.rs
use crate::error::SiriusError;
use log::debug;
use reqwest::Client;

/// Fetches the company page that carries the key-ratios list.
#[derive(Debug, Clone)]
pub struct ScreenerClient {
    base_url: String,
    http: Client,
}

impl ScreenerClient {
    pub fn new(base_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn company_url(&self, ticker: &str) -> String {
        format!("{}/company/{}/", self.base_url, urlencoding::encode(ticker))
    }

    pub async fn key_ratios_page(&self, ticker: &str) -> Result<String, SiriusError> {
        let url = self.company_url(ticker);
        debug!("Scraping key ratios from {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SiriusError::Upstream { status: status.as_u16(), body });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_url_encodes_ticker() {
        let client = ScreenerClient::new("https://www.screener.in/", Client::new());
        assert_eq!(client.company_url("TCS"), "https://www.screener.in/company/TCS/");
        assert_eq!(client.company_url("M&M"), "https://www.screener.in/company/M%26M/");
    }
}
