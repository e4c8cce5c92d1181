// src/orchestrator.rs
//! Decide-then-execute flow behind the chat endpoint.

use crate::client::OpenAiClient;
use crate::provider::MarketDataProvider;
use crate::tool::{ToolCall, ToolCallProposal, ToolResolver, ToolResult};
use crate::tools;
use log::{error, info, warn};
use std::sync::Arc;
use thiserror::Error;

pub const SYSTEM_PROMPT: &str = "You are an expert financial assistant. Your job is to understand the user's query \
and select the appropriate tool to get the necessary financial data.
You must respond only by calling the functions you have been provided.
If the user asks about an Indian company, ensure the ticker symbol ends with '.NS'.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecisionError {
    #[error("OpenAI client not configured. Please set the OPENAI_API_KEY.")]
    NotConfigured,

    #[error("An error occurred with the OpenAI API: {0}")]
    Api(String),
}

pub struct Orchestrator {
    llm: Option<OpenAiClient>,
    provider: Arc<dyn MarketDataProvider>,
}

impl Orchestrator {
    pub fn new(llm: Option<OpenAiClient>, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { llm, provider }
    }

    pub fn llm_configured(&self) -> bool {
        self.llm.is_some()
    }

    pub fn provider(&self) -> &dyn MarketDataProvider {
        self.provider.as_ref()
    }

    /// Asks the model which tools apply to `query`. An empty vector means the
    /// model chose not to call any tool.
    pub async fn decide(&self, query: &str) -> Result<Vec<ToolCallProposal>, DecisionError> {
        let llm = self.llm.as_ref().ok_or_else(|| {
            warn!("Chat query received but no OpenAI API key is configured");
            DecisionError::NotConfigured
        })?;

        let proposals = llm
            .propose_tool_calls(SYSTEM_PROMPT, query, ToolResolver.list_tools())
            .await
            .map_err(|e| {
                error!("❌ OpenAI call failed: {}", e);
                DecisionError::Api(e.to_string())
            })?;

        info!(
            "🤖 Model proposed {} tool call(s): {:?}",
            proposals.len(),
            proposals.iter().map(|p| p.function.name.as_str()).collect::<Vec<_>>()
        );
        Ok(proposals)
    }

    /// Runs one proposal against the market-data adapters.
    pub async fn execute(&self, proposal: &ToolCallProposal) -> ToolResult {
        let call = ToolCall::from_proposal(proposal).map_err(|e| {
            warn!("Rejected tool call {}: {}", proposal.function.name, e);
            e
        })?;
        self.dispatch(call).await
    }

    pub async fn dispatch(&self, call: ToolCall) -> ToolResult {
        let provider = self.provider();
        info!("🔧 Executing {}", call.kind().name());
        match call {
            ToolCall::StockPrice(args) => tools::get_stock_price_data(provider, &args.ticker_symbol).await,
            ToolCall::PriceEarning(args) => tools::get_price_earning_data(provider, &args.ticker_symbol).await,
            ToolCall::FinancialStatement(args) => {
                tools::get_financial_statement(
                    provider,
                    &args.ticker_symbol,
                    &args.statement_type,
                    &args.frequency,
                )
                .await
            }
            ToolCall::CompanyProfile(args) => tools::get_company_profile(provider, &args.ticker_symbol).await,
            ToolCall::LatestNews(args) => tools::get_latest_news(provider, &args.ticker_symbol).await,
        }
    }
}
