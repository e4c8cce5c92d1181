mod common;

use common::{reliance_info, StubProvider, RATIOS_PAGE};
use serde_json::{json, Value};
use sirius_finance::provider::StatementColumn;
use sirius_finance::tool::ToolError;
use sirius_finance::tools;

#[tokio::test]
async fn price_snapshot_normalizes_ticker_and_reshapes_fields() {
    let provider = StubProvider::new().with_info(json!({"currentPrice": 2500, "currency": "INR"}));

    let data = tools::get_stock_price_data(&provider, "RELIANCE").await.unwrap();

    assert_eq!(data["symbol"], "RELIANCE.NS");
    assert_eq!(data["currentPrice"], json!(2500));
    assert_eq!(data["currency"], "INR");
    assert_eq!(data["dayHigh"], Value::Null);
    assert_eq!(data.as_object().unwrap().len(), 10);
    assert_eq!(provider.requests(), vec!["info:RELIANCE.NS"]);
}

#[tokio::test]
async fn price_snapshot_falls_back_to_regular_market_price() {
    let provider = StubProvider::new().with_info(json!({"regularMarketPrice": 3912.4, "trailingPE": 30.1}));

    let data = tools::get_stock_price_data(&provider, "TCS.NS").await.unwrap();

    assert_eq!(data["currentPrice"], json!(3912.4));
    assert_eq!(data["TrailingPE"], json!(30.1));
    assert_eq!(provider.requests(), vec!["info:TCS.NS"]);
}

#[tokio::test]
async fn price_snapshot_without_price_is_not_found() {
    let provider = StubProvider::new().with_info(json!({"shortName": "DELISTED CO"}));

    let err = tools::get_stock_price_data(&provider, "GONE").await.unwrap_err();

    assert_eq!(
        err,
        ToolError::NotFound(
            "Could not retrieve price for GONE.NS. It might be an invalid ticker or delisted.".to_string()
        )
    );
}

#[tokio::test]
async fn provider_failure_becomes_error_value() {
    let provider = StubProvider::failing("service unavailable");

    let err = tools::get_stock_price_data(&provider, "TCS").await.unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("An error occurred with the market data provider for ticker 'TCS.NS'"));
    assert!(message.contains("service unavailable"));
    assert_eq!(err.to_value()["error"], json!(message));
}

#[tokio::test]
async fn pe_snapshot_returns_both_ratios() {
    let provider = StubProvider::new().with_info(reliance_info());

    let data = tools::get_price_earning_data(&provider, "RELIANCE.BO").await.unwrap();

    assert_eq!(
        data,
        json!({
            "shortName": "RELIANCE INDUSTRIES LTD",
            "symbol": "RELIANCE.BO",
            "TrailingPE": 24.7,
            "ForwardPE": 21.3
        })
    );
}

#[tokio::test]
async fn pe_snapshot_is_rejected_when_price_is_missing() {
    let provider = StubProvider::new().with_info(json!({"trailingPE": 18.0, "forwardPE": 16.5}));

    let err = tools::get_price_earning_data(&provider, "INFY").await.unwrap_err();

    assert!(matches!(err, ToolError::NotFound(_)));
    assert!(err.to_string().contains("INFY.NS"));
}

#[tokio::test]
async fn invalid_statement_type_fails_for_every_ticker_and_frequency() {
    let provider = StubProvider::new();

    for ticker in ["RELIANCE", "TCS.NS", "INFY.BO"] {
        for frequency in ["annual", "quarterly", "weekly"] {
            let err = tools::get_financial_statement(&provider, ticker, "equity", frequency)
                .await
                .unwrap_err();
            assert_eq!(
                err.to_value(),
                json!({"error": "Invalid statement_type. Must be 'income', 'balance', or 'cashflow'."})
            );
        }
    }
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn statement_is_keyed_by_period_end() {
    let provider = StubProvider::new().with_statement(vec![
        StatementColumn {
            period_end: 1711843200,
            rows: json!({"totalRevenue": 9000000, "netIncome": 700000}).as_object().cloned().unwrap(),
        },
        StatementColumn {
            period_end: 1680220800,
            rows: json!({"totalRevenue": 8000000}).as_object().cloned().unwrap(),
        },
    ]);

    let data = tools::get_financial_statement(&provider, "TCS", "Income", "QUARTERLY")
        .await
        .unwrap();

    assert_eq!(data["2024-03-31 00:00:00"]["netIncome"], json!(700000));
    assert_eq!(data["2023-03-31 00:00:00"]["totalRevenue"], json!(8000000));
    assert_eq!(provider.requests(), vec!["statement:TCS.NS:income:quarterly"]);
}

#[tokio::test]
async fn statement_frequency_other_than_annual_selects_quarterly() {
    let provider = StubProvider::new();

    tools::get_financial_statement(&provider, "HDFCBANK", "balance", "annual").await.unwrap();
    tools::get_financial_statement(&provider, "HDFCBANK", "cashflow", "monthly").await.unwrap();

    assert_eq!(
        provider.requests(),
        vec![
            "statement:HDFCBANK.NS:balance:annual",
            "statement:HDFCBANK.NS:cashflow:quarterly"
        ]
    );
}

#[tokio::test]
async fn company_profile_has_fixed_fields() {
    let provider = StubProvider::new().with_info(reliance_info());

    let data = tools::get_company_profile(&provider, "RELIANCE").await.unwrap();

    assert_eq!(data["longName"], "Reliance Industries Limited");
    assert_eq!(data["sector"], "Energy");
    assert_eq!(data["fullTimeEmployees"], json!(347362));
    assert_eq!(data["city"], "Mumbai");
    assert_eq!(data.as_object().unwrap().len(), 8);
    assert!(data.get("currentPrice").is_none());
}

#[tokio::test]
async fn news_placeholder_when_provider_has_nothing() {
    let provider = StubProvider::new();

    let data = tools::get_latest_news(&provider, "TCS.NS").await.unwrap();

    assert_eq!(data, json!([{"message": "No recent news found."}]));
    assert_eq!(provider.requests(), vec!["news:TCS.NS"]);
}

#[tokio::test]
async fn news_articles_pass_through() {
    let articles = vec![
        json!({"uuid": "a1", "title": "TCS wins deal", "publisher": "Reuters"}),
        json!({"uuid": "a2", "title": "IT stocks rally", "publisher": "Mint"}),
    ];
    let provider = StubProvider::new().with_news(articles.clone());

    let data = tools::get_latest_news(&provider, "TCS").await.unwrap();

    assert_eq!(data, json!(articles));
}

#[tokio::test]
async fn key_ratios_use_ticker_as_given() {
    let provider = StubProvider::new().with_ratios_page(RATIOS_PAGE);

    let ratios = tools::scrape_key_ratios(&provider, "reliance").await.unwrap();

    assert_eq!(ratios["Stock P/E"], "24.7");
    assert_eq!(ratios["Market Cap"], "₹ 16,91,000 Cr.");
    assert_eq!(provider.requests(), vec!["ratios:reliance"]);
}

#[tokio::test]
async fn key_ratios_missing_from_page_is_not_found() {
    let provider = StubProvider::new().with_ratios_page("<html><body>Page not found</body></html>");

    let err = tools::scrape_key_ratios(&provider, "NOPE").await.unwrap_err();

    assert_eq!(err.to_string(), "No key ratios found for ticker 'NOPE'.");
}
