use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use streakboard_app::application::services::ConfigService;
use streakboard_app::presentation::cli::Cli;
use streakboard_app::presentation::commands::dispatch;
use streakboard_app::presentation::error::CommandError;
use streakboard_app::presentation::state::AppState;
use streakboard_domain::shared::UserId;
use streakboard_infrastructure::logging::init_logger;
use streakboard_infrastructure::persistence::Database;

const APP_DIR: &str = "streakboard";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Command failed: {}", err);
            eprintln!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<String, CommandError> {
    let config_path = match cli.config {
        Some(path) => path,
        None => ConfigService::default_path()?,
    };
    let config = Arc::new(ConfigService::load(&config_path));

    let data_dir = data_dir()?;
    init_logger(
        &data_dir.join("logs"),
        config.get_log_level().as_str(),
        cli.verbose,
    )?;

    let db_path = cli
        .db
        .or_else(|| config.database_path())
        .unwrap_or_else(|| data_dir.join("streakboard.db"));
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| CommandError::invalid_input("Database path is not valid UTF-8"))?;
    info!("Database path: {}", db_path_str);

    let user_id = match cli.user {
        Some(user) => UserId::from_string(&user),
        None => config.ensure_user_id()?,
    };

    let database = Database::new(db_path_str).await?;
    let state = AppState::new(database, config).await?;

    dispatch(&state, &user_id, cli.command, Utc::now()).await
}

fn data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir().context("Failed to get local data dir")?;
    Ok(base.join(APP_DIR))
}
