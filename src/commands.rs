use crate::cli::{Args, Command, ConfigAction};
use football_gateway::config::Config;
use football_gateway::data_fetcher::Gateway;
use football_gateway::error::AppError;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Runs a provider query and prints the result as JSON.
pub async fn handle_query_command(args: &Args, gateway: &Gateway) -> Result<(), AppError> {
    match &args.command {
        Command::Leagues { ids, country } => {
            let leagues = match country {
                Some(country) => gateway.get_leagues_by_country(country).await?,
                None => gateway.get_leagues(ids).await?,
            };
            print_json(&leagues, args.pretty)
        }
        Command::Fixtures {
            league,
            season,
            status,
        } => {
            let fixtures = gateway
                .get_fixtures(*league, *season, status.as_deref())
                .await?;
            print_json(&fixtures, args.pretty)
        }
        Command::Live => {
            let fixtures = gateway.get_live_fixtures().await?;
            print_json(&fixtures, args.pretty)
        }
        Command::Config { .. } => Err(AppError::config_error(
            "Configuration commands do not query the provider",
        )),
    }
}

/// Handles `config show` and `config init`.
pub async fn handle_config_command(action: &ConfigAction) -> Result<(), AppError> {
    match action {
        ConfigAction::Show => Config::display().await,
        ConfigAction::Init { force } => {
            let path = Config::get_config_path();
            if Path::new(&path).exists() && !force {
                return Err(AppError::config_error(format!(
                    "Config file already exists at {path} (use --force to overwrite)"
                )));
            }
            Config::default().save_to_path(&path).await?;
            info!("Wrote default configuration to {}", path);
            println!("Config saved to {path}");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), AppError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
