// src/lib.rs
pub mod client;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod provider;
pub mod server;
pub mod symbols;
pub mod tool;
pub mod tools;
pub mod types;

pub use client::OpenAiClient;
pub use config::SiriusConfig;
pub use error::SiriusError;
pub use orchestrator::{DecisionError, Orchestrator};
pub use provider::{HttpMarketData, MarketDataProvider};
pub use server::{configure, AppState};
pub use tool::{ToolCall, ToolCallProposal, ToolError, ToolKind, ToolResolver, ToolResult};
