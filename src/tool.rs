// src/tool.rs
use once_cell::sync::Lazy;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Failure half of every tool result. The message is what callers see.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Error: Tool '{0}' not found.")]
    UnknownTool(String),

    #[error("Error: Invalid arguments format from LLM.")]
    InvalidArguments,

    #[error("Error executing function '{tool}': {message}")]
    Execution { tool: String, message: String },
}

impl ToolError {
    /// Wire shape of a failed tool result.
    pub fn to_value(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

pub type ToolResult = Result<Value, ToolError>;

/// Renders a result the way it is returned to HTTP and CLI callers.
pub fn result_to_value(result: ToolResult) -> Value {
    match result {
        Ok(value) => value,
        Err(err) => err.to_value(),
    }
}

// OpenAI-compatible tool call, kept serializable so it can be logged or echoed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallProposal {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionCall,
}

impl ToolCallProposal {
    pub fn function(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: "function".to_string(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    StockPrice,
    PriceEarning,
    FinancialStatement,
    CompanyProfile,
    LatestNews,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::StockPrice,
        ToolKind::PriceEarning,
        ToolKind::FinancialStatement,
        ToolKind::CompanyProfile,
        ToolKind::LatestNews,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::StockPrice => "get_stock_price_data",
            Self::PriceEarning => "get_price_earning_data",
            Self::FinancialStatement => "get_financial_statement",
            Self::CompanyProfile => "get_company_profile",
            Self::LatestNews => "get_latest_news",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::StockPrice => {
                "Fetches the latest stock price and key trading data for a given company ticker symbol."
            }
            Self::PriceEarning => {
                "Fetches the Trailing P/E ratio and Forward P/E ratio for a given company ticker symbol."
            }
            Self::FinancialStatement => {
                "Fetches a company's financial statements (income statement, balance sheet, or cash flow)."
            }
            Self::CompanyProfile => {
                "Fetches key profile information for a company, such as sector, industry, and business summary."
            }
            Self::LatestNews => "Fetches the latest news articles for a given company.",
        }
    }

    pub fn input_schema(&self) -> Value {
        match self {
            Self::StockPrice | Self::PriceEarning => json!({
                "type": "object",
                "properties": {
                    "ticker_symbol": {
                        "type": "string",
                        "description": "The stock ticker symbol. For Indian companies on the NSE, it must end with '.NS'. For example, 'RELIANCE.NS' or 'TCS.NS'."
                    }
                },
                "required": ["ticker_symbol"]
            }),
            Self::FinancialStatement => json!({
                "type": "object",
                "properties": {
                    "ticker_symbol": {
                        "type": "string",
                        "description": "The stock ticker symbol, e.g., 'RELIANCE.NS'."
                    },
                    "statement_type": {
                        "type": "string",
                        "enum": ["income", "balance", "cashflow"],
                        "description": "The type of financial statement to fetch."
                    },
                    "frequency": {
                        "type": "string",
                        "enum": ["annual", "quarterly"],
                        "description": "The frequency of the report. Defaults to 'annual'."
                    }
                },
                "required": ["ticker_symbol", "statement_type"]
            }),
            Self::CompanyProfile | Self::LatestNews => json!({
                "type": "object",
                "properties": {
                    "ticker_symbol": {
                        "type": "string",
                        "description": "The stock ticker symbol, e.g., 'RELIANCE.NS'."
                    }
                },
                "required": ["ticker_symbol"]
            }),
        }
    }

    /// Entry for the `tools` array of a chat-completions request.
    pub fn descriptor(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": self.input_schema()
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TickerArgs {
    pub ticker_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatementArgs {
    pub ticker_symbol: String,
    pub statement_type: String,
    #[serde(default = "default_frequency")]
    pub frequency: String,
}

fn default_frequency() -> String {
    "annual".to_string()
}

/// A tool invocation with its arguments already checked against the tool's
/// parameter struct.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    StockPrice(TickerArgs),
    PriceEarning(TickerArgs),
    FinancialStatement(StatementArgs),
    CompanyProfile(TickerArgs),
    LatestNews(TickerArgs),
}

impl ToolCall {
    /// Resolves the tool, then parses the argument text. Unknown tools are
    /// reported before the arguments are looked at.
    pub fn parse(name: &str, arguments: &str) -> Result<Self, ToolError> {
        let kind = ToolResolver
            .resolve(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let raw: Value = serde_json::from_str(arguments).map_err(|_| ToolError::InvalidArguments)?;

        Ok(match kind {
            ToolKind::StockPrice => Self::StockPrice(typed_args(kind, raw)?),
            ToolKind::PriceEarning => Self::PriceEarning(typed_args(kind, raw)?),
            ToolKind::FinancialStatement => Self::FinancialStatement(typed_args(kind, raw)?),
            ToolKind::CompanyProfile => Self::CompanyProfile(typed_args(kind, raw)?),
            ToolKind::LatestNews => Self::LatestNews(typed_args(kind, raw)?),
        })
    }

    pub fn from_proposal(proposal: &ToolCallProposal) -> Result<Self, ToolError> {
        Self::parse(&proposal.function.name, &proposal.function.arguments)
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::StockPrice(_) => ToolKind::StockPrice,
            Self::PriceEarning(_) => ToolKind::PriceEarning,
            Self::FinancialStatement(_) => ToolKind::FinancialStatement,
            Self::CompanyProfile(_) => ToolKind::CompanyProfile,
            Self::LatestNews(_) => ToolKind::LatestNews,
        }
    }
}

fn typed_args<T: DeserializeOwned>(kind: ToolKind, raw: Value) -> Result<T, ToolError> {
    let execution_error = |message: String| ToolError::Execution {
        tool: kind.name().to_string(),
        message,
    };

    if !raw.is_object() {
        return Err(execution_error("arguments must be a JSON object".to_string()));
    }
    serde_json::from_value(raw).map_err(|e| execution_error(e.to_string()))
}

static TOOLS_SCHEMA: Lazy<Vec<Value>> = Lazy::new(|| ToolKind::ALL.iter().map(ToolKind::descriptor).collect());

pub struct ToolResolver;

impl ToolResolver {
    pub fn resolve(&self, name: &str) -> Option<ToolKind> {
        ToolKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Schemas sent to the model with every decision request.
    pub fn list_tools(&self) -> &'static [Value] {
        TOOLS_SCHEMA.as_slice()
    }

    pub fn get_available_tool_names(&self) -> Vec<&'static str> {
        ToolKind::ALL.iter().map(ToolKind::name).collect()
    }
}
