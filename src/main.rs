// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, Command};
use football_gateway::config::Config;
use football_gateway::data_fetcher::Gateway;
use football_gateway::data_fetcher::cache::ResultCache;
use football_gateway::error::AppError;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Settings are read before validation so the log path is known even when the
    // credential is missing
    let settings = Config::load_unvalidated(&Config::get_config_path()).await?;
    let (log_file_path, _guard) =
        logging::setup_logging(&args, settings.log_file_path.as_deref()).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if let Command::Config { action } = &args.command {
        return commands::handle_config_command(action).await;
    }

    settings.validate()?;
    let cache = Arc::new(ResultCache::new(settings.cache_capacity));
    let gateway = Gateway::from_config(&settings, cache)?;

    let result = commands::handle_query_command(&args, &gateway).await;
    if let Err(e) = &result {
        tracing::error!("Query failed: {e}");
    }
    result
}
