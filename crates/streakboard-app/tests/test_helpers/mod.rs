use chrono::{DateTime, Local, TimeZone, Utc};
use std::sync::Arc;
use tempfile::TempDir;

use streakboard_app::application::commands::{
    CommandHandler, CompleteHabitCommand, CreateHabitCommand,
};
use streakboard_app::application::services::ConfigService;
use streakboard_app::presentation::state::AppState;
use streakboard_domain::habit::Frequency;
use streakboard_domain::shared::{HabitId, UserId};
use streakboard_infrastructure::persistence::Database;

/// App state over an in-memory database, with its config file inside `dir`
pub async fn setup_app_state(dir: &TempDir) -> AppState {
    let database = Database::in_memory().await.expect("open in-memory db");
    let config = Arc::new(ConfigService::load(&dir.path().join("config.json")));

    AppState::new(database, config)
        .await
        .expect("build app state")
}

/// 2025-03-`day` at `hour`:00 local time
pub fn local(day: u32, hour: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(2025, 3, day, hour, 0, 0)
        .earliest()
        .expect("valid local time")
        .with_timezone(&Utc)
}

pub async fn add_habit(state: &AppState, user: &UserId, title: &str) -> HabitId {
    let result = state
        .command_handlers
        .create_habit
        .handle(CreateHabitCommand {
            user_id: user.clone(),
            title: title.to_string(),
            description: format!("{} every day", title),
            frequency: Frequency::Daily,
        })
        .await
        .expect("create habit");

    HabitId::from_string(&result.habit_id)
}

#[allow(dead_code)]
pub async fn complete_on(state: &AppState, user: &UserId, habit_id: &HabitId, days: &[u32]) {
    for day in days {
        state
            .command_handlers
            .complete_habit
            .handle(CompleteHabitCommand {
                user_id: user.clone(),
                habit_id: habit_id.clone(),
                completed_at: local(*day, 9),
            })
            .await
            .expect("complete habit");
    }
}
