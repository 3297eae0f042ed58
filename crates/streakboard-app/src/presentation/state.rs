use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::event_handlers::StreakRefreshEventHandler;
use crate::application::queries::{HabitQueries, StreakQueries};
use crate::application::services::ConfigService;
use streakboard_domain::completion::CompletionRepository;
use streakboard_domain::events::EventBus;
use streakboard_domain::habit::HabitRepository;
use streakboard_domain::shared::DomainError;
use streakboard_infrastructure::persistence::Database;

/// Command handlers container
pub struct CommandHandlers {
    pub create_habit: Arc<CreateHabitCommandHandler>,
    pub complete_habit: Arc<CompleteHabitCommandHandler>,
    pub delete_habit: Arc<DeleteHabitCommandHandler>,
}

pub struct Runtime {
    pub pool: Arc<SqlitePool>,
    pub db: Arc<Database>,
    pub event_bus: Arc<dyn EventBus>,
}

pub struct Repositories {
    pub habit: Arc<dyn HabitRepository>,
    pub completion: Arc<dyn CompletionRepository>,
}

pub struct Services {
    pub config: Arc<ConfigService>,
    pub streak_refresh: Arc<StreakRefreshEventHandler>,
}

pub struct Queries {
    pub habit: Arc<HabitQueries>,
    pub streak: Arc<StreakQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub services: Services,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}

impl AppState {
    pub async fn new(database: Database, config: Arc<ConfigService>) -> Result<Self, DomainError> {
        crate::presentation::bootstrap::build_app_state(database, config).await
    }
}
