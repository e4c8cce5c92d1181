// src/bin/sirius_cli.rs
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use serde_json::Value;
use std::sync::Arc;

use sirius_finance::client::{OpenAiClient, OpenAiConfig};
use sirius_finance::config::SiriusConfig;
use sirius_finance::orchestrator::Orchestrator;
use sirius_finance::provider::{build_http_client, HttpMarketData, MarketDataProvider};
use sirius_finance::server::FALLBACK_RESPONSE;
use sirius_finance::tool::{result_to_value, ToolResolver, ToolResult};
use sirius_finance::tools;

#[derive(Parser)]
#[command(name = "sirius-cli")]
#[command(about = "Project Sirius financial data CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest price and trading range
    Price { ticker: String },
    /// Trailing and forward P/E
    Pe { ticker: String },
    /// Income statement, balance sheet or cash flow
    Statement {
        ticker: String,
        #[arg(short = 't', long = "type", default_value = "income")]
        statement_type: String,
        #[arg(short, long, default_value = "annual")]
        frequency: String,
    },
    /// Sector, industry and business summary
    Profile { ticker: String },
    /// Latest news articles
    News { ticker: String },
    /// Key ratios scraped from the company page
    Ratios { ticker: String },
    /// Print the tool schemas sent to the model
    Tools,
    /// Ask a natural-language question
    Chat { query: String },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = match SiriusConfig::from_env() {
        Ok(config) => config,
        Err(e) => fail(&format!("Invalid configuration: {:#}", e)),
    };
    let provider: Arc<dyn MarketDataProvider> = match HttpMarketData::from_config(&config) {
        Ok(provider) => Arc::new(provider),
        Err(e) => fail(&e.to_string()),
    };

    match cli.command {
        Commands::Price { ticker } => {
            handle_result(tools::get_stock_price_data(provider.as_ref(), &ticker).await)
        }
        Commands::Pe { ticker } => {
            handle_result(tools::get_price_earning_data(provider.as_ref(), &ticker).await)
        }
        Commands::Statement { ticker, statement_type, frequency } => handle_result(
            tools::get_financial_statement(provider.as_ref(), &ticker, &statement_type, &frequency).await,
        ),
        Commands::Profile { ticker } => {
            handle_result(tools::get_company_profile(provider.as_ref(), &ticker).await)
        }
        Commands::News { ticker } => handle_result(tools::get_latest_news(provider.as_ref(), &ticker).await),
        Commands::Ratios { ticker } => {
            let result = tools::scrape_key_ratios(provider.as_ref(), &ticker)
                .await
                .map(|ratios| serde_json::json!(ratios));
            handle_result(result)
        }
        Commands::Tools => print_json(&Value::Array(ToolResolver.list_tools().to_vec())),
        Commands::Chat { query } => {
            let http = match build_http_client(&config) {
                Ok(http) => http,
                Err(e) => fail(&e.to_string()),
            };
            let llm = OpenAiConfig::from_sirius(&config).map(|llm_config| OpenAiClient::with_http_client(llm_config, http));
            let orchestrator = Orchestrator::new(llm, provider);

            let proposals = match orchestrator.decide(&query).await {
                Ok(proposals) => proposals,
                Err(e) => fail(&e.to_string()),
            };
            match proposals.first() {
                Some(first) => {
                    eprintln!("🔧 {}({})", first.function.name, first.function.arguments);
                    handle_result(orchestrator.execute(first).await);
                }
                None => println!("{}", FALLBACK_RESPONSE),
            }
        }
    }
}

fn handle_result(result: ToolResult) {
    let failed = result.is_err();
    print_json(&result_to_value(result));
    if failed {
        std::process::exit(1);
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("❌ Error: {}", message);
    std::process::exit(1);
}
