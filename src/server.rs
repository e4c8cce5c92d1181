// src/server.rs
use crate::client::{OpenAiClient, OpenAiConfig};
use crate::config::SiriusConfig;
use crate::error::SiriusError;
use crate::orchestrator::Orchestrator;
use crate::provider::{self, HttpMarketData, MarketDataProvider};
use crate::tool::{result_to_value, ToolResolver};
use crate::tools;
use crate::types::{ChatQuery, ChatResponse, CompanyPriceResponse, CompanyRatiosResponse, ErrorDetail};
use actix_web::{error, web, HttpResponse, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str = "Welcome to Project Sirius API";
pub const FALLBACK_RESPONSE: &str =
    "I can only fetch financial data. Please ask me about a specific company.";

/// Built once at start-up and shared read-only across workers.
pub struct AppState {
    pub config: SiriusConfig,
    pub session_id: Uuid,
    pub orchestrator: Orchestrator,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: SiriusConfig) -> Result<Self, SiriusError> {
        let provider: Arc<dyn MarketDataProvider> = Arc::new(HttpMarketData::from_config(&config)?);
        Self::with_provider(config, provider)
    }

    /// Uses the given market-data provider; the LLM client still comes from `config`.
    pub fn with_provider(config: SiriusConfig, provider: Arc<dyn MarketDataProvider>) -> Result<Self, SiriusError> {
        let llm = match OpenAiConfig::from_sirius(&config) {
            Some(llm_config) => Some(OpenAiClient::with_http_client(
                llm_config,
                provider::build_http_client(&config)?,
            )),
            None => {
                warn!("OPENAI_API_KEY is not set; the chat endpoint will report a configuration error");
                None
            }
        };

        Ok(Self {
            session_id: Uuid::new_v4(),
            orchestrator: Orchestrator::new(llm, provider),
            config,
            start_time: Utc::now(),
        })
    }
}

/// Registers every route plus the JSON body rules.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(read_root))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .route("/chat/", web::post().to(handle_chat))
                .route("/chat", web::post().to(handle_chat))
                .route("/tools", web::get().to(list_tools))
                .route("/company/{ticker}/price", web::get().to(get_company_price))
                .route("/company/{ticker}/ratios", web::get().to(get_company_ratios)),
        );
}

/// Malformed or incomplete bodies are answered with 422 and a `detail`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        warn!("Rejected request body: {}", detail);
        error::InternalError::from_response(err, HttpResponse::UnprocessableEntity().json(ErrorDetail::new(detail)))
            .into()
    })
}

pub async fn read_root() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": WELCOME_MESSAGE }))
}

/// Decides on a tool, runs only the first proposal, and returns its raw result.
pub async fn handle_chat(payload: web::Json<ChatQuery>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let query = payload.into_inner().query;
    info!("💬 Chat query: {}", query);

    let proposals = match state.orchestrator.decide(&query).await {
        Ok(proposals) => proposals,
        Err(e) => return Ok(HttpResponse::InternalServerError().json(ErrorDetail::new(e.to_string()))),
    };

    let Some(first) = proposals.first() else {
        return Ok(HttpResponse::Ok().json(ChatResponse {
            response: serde_json::json!(FALLBACK_RESPONSE),
        }));
    };

    if proposals.len() > 1 {
        warn!("Model proposed {} tool calls; executing only '{}'", proposals.len(), first.function.name);
    }

    let result = state.orchestrator.execute(first).await;
    Ok(HttpResponse::Ok().json(ChatResponse {
        response: result_to_value(result),
    }))
}

pub async fn get_company_price(path: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let ticker = path.into_inner().to_uppercase();

    match tools::get_stock_price_data(state.orchestrator.provider(), &ticker).await {
        Ok(data) => Ok(HttpResponse::Ok().json(CompanyPriceResponse { ticker, data })),
        Err(e) => Ok(HttpResponse::NotFound().json(ErrorDetail::new(e.to_string()))),
    }
}

/// Passes the ticker through untouched; see `tools::scrape_key_ratios`.
pub async fn get_company_ratios(path: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let ticker = path.into_inner();

    match tools::scrape_key_ratios(state.orchestrator.provider(), &ticker).await {
        Ok(ratios) => Ok(HttpResponse::Ok().json(CompanyRatiosResponse { ticker, ratios })),
        Err(e) => Ok(HttpResponse::NotFound().json(ErrorDetail::new(e.to_string()))),
    }
}

pub async fn list_tools() -> HttpResponse {
    let tools = ToolResolver.list_tools();
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "tools": tools,
        "count": tools.len()
    }))
}

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "project-sirius-api",
        "session_id": state.session_id,
        "uptime_seconds": (Utc::now() - state.start_time).num_seconds(),
        "version": env!("CARGO_PKG_VERSION"),
        "available_tools": ToolResolver.get_available_tool_names(),
        "llm_configured": state.orchestrator.llm_configured()
    }))
}
