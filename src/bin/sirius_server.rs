// src/bin/sirius_server.rs
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use sirius_finance::config::SiriusConfig;
use sirius_finance::server::{configure, AppState};
use sirius_finance::tool::ToolResolver;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match SiriusConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let bind_address = config.bind_address();
    let state = match AppState::new(config) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            error!("❌ Failed to initialise application state: {}", e);
            std::process::exit(1);
        }
    };

    info!("🚀 Project Sirius API running on http://{}", bind_address);
    info!("📋 Available endpoints:");
    info!("  • GET  /                               - Welcome message");
    info!("  • POST /api/v1/chat/                   - Natural-language financial query");
    info!("  • GET  /api/v1/company/{{ticker}}/price  - Price snapshot");
    info!("  • GET  /api/v1/company/{{ticker}}/ratios - Key ratios");
    info!("  • GET  /api/v1/tools                   - Tool schemas sent to the model");
    info!("  • GET  /health                         - Health check");
    info!("📚 Available tools: {}", ToolResolver.get_available_tool_names().join(", "));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
