use chrono::{DateTime, Utc};
use log::info;

use crate::application::commands::{
    CommandHandler, CompleteHabitCommand, CreateHabitCommand, DeleteHabitCommand,
};
use crate::application::services::LogLevel;
use crate::presentation::cli::{AddHabitArgs, Commands, ConfigCommands, HabitCommands};
use crate::presentation::error::CommandError;
use crate::presentation::output;
use crate::presentation::state::AppState;
use streakboard_domain::shared::{HabitId, UserId};

/// Run one CLI command for `user_id` and return what should be printed.
pub async fn dispatch(
    state: &AppState,
    user_id: &UserId,
    command: Commands,
    now: DateTime<Utc>,
) -> Result<String, CommandError> {
    match command {
        Commands::Habit(habit_command) => dispatch_habit(state, user_id, habit_command, now).await,

        Commands::Today => {
            let feed = state.queries.habit.today_feed(user_id, now).await?;
            Ok(output::render_today(&feed))
        }

        Commands::Streaks { top, json } => {
            let mut entries = state.queries.streak.get_leaderboard(user_id).await?;
            if let Some(top) = top {
                entries.truncate(top);
            }

            if json {
                Ok(output::to_json(&entries)?)
            } else {
                Ok(output::render_leaderboard(&entries))
            }
        }

        Commands::Streak { habit_id, json } => {
            let entry = state
                .queries
                .streak
                .get_habit_streak(user_id, &HabitId::from_string(&habit_id))
                .await?;

            if json {
                Ok(output::to_json(&entry)?)
            } else {
                Ok(output::render_streak(&entry))
            }
        }

        Commands::Config(config_command) => dispatch_config(state, config_command),
    }
}

async fn dispatch_habit(
    state: &AppState,
    user_id: &UserId,
    command: HabitCommands,
    now: DateTime<Utc>,
) -> Result<String, CommandError> {
    match command {
        HabitCommands::Add(AddHabitArgs {
            title,
            description,
            frequency,
        }) => {
            let result = state
                .command_handlers
                .create_habit
                .handle(CreateHabitCommand {
                    user_id: user_id.clone(),
                    title,
                    description,
                    frequency,
                })
                .await?;

            Ok(format!("Created habit {}", result.habit_id))
        }

        HabitCommands::List => {
            let habits = state.queries.habit.list_habits(user_id).await?;
            Ok(output::render_habits(&habits))
        }

        HabitCommands::Complete { habit_id } => {
            let habit_id = HabitId::from_string(&habit_id);
            state
                .command_handlers
                .complete_habit
                .handle(CompleteHabitCommand {
                    user_id: user_id.clone(),
                    habit_id: habit_id.clone(),
                    completed_at: now,
                })
                .await?;

            match state.services.streak_refresh.latest(&habit_id).await {
                Some(streak) => Ok(format!(
                    "Completed {} (current streak {}, best {})",
                    habit_id, streak.current_streak, streak.best_streak
                )),
                None => Ok(format!("Completed {}", habit_id)),
            }
        }

        HabitCommands::Delete { habit_id } => {
            let habit_id = HabitId::from_string(&habit_id);
            state
                .command_handlers
                .delete_habit
                .handle(DeleteHabitCommand {
                    user_id: user_id.clone(),
                    habit_id: habit_id.clone(),
                })
                .await?;

            Ok(format!("Deleted habit {}", habit_id))
        }
    }
}

fn dispatch_config(state: &AppState, command: ConfigCommands) -> Result<String, CommandError> {
    let config = &state.services.config;

    match command {
        ConfigCommands::Show => Ok(output::render_config(
            &config.snapshot(),
            config.config_path(),
        )),

        ConfigCommands::SetLogLevel { level } => {
            let level: LogLevel = level
                .parse()
                .map_err(|e: anyhow::Error| CommandError::invalid_input(e.to_string()))?;
            config.set_log_level(level)?;
            info!("Log level set to {}", level.as_str());

            Ok(format!(
                "Log level set to {} (applies from the next run)",
                level.as_str()
            ))
        }
    }
}
