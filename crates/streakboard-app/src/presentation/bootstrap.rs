use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::event_handlers::StreakRefreshEventHandler;
use crate::application::queries::{HabitQueries, StreakQueries};
use crate::application::services::ConfigService;
use crate::presentation::state::{
    AppState, CommandHandlers, Queries, Repositories, Runtime, Services,
};
use streakboard_domain::completion::CompletionRepository;
use streakboard_domain::events::habit_events::{HabitCompleted, HabitDeleted};
use streakboard_domain::events::{EventBus, TypedEventHandlerWrapper};
use streakboard_domain::habit::HabitRepository;
use streakboard_domain::shared::DomainError;
use streakboard_infrastructure::events::InMemoryEventBus;
use streakboard_infrastructure::persistence::{
    repositories::{SqliteCompletionRepository, SqliteHabitRepository},
    Database,
};

/// Wire repositories, queries, handlers and the event bus around an open database.
pub async fn build_app_state(
    database: Database,
    config: Arc<ConfigService>,
) -> Result<AppState, DomainError> {
    let startup_started_at = Instant::now();

    info!("Running migrations...");
    let started_at = Instant::now();
    database.run_migrations().await?;
    info!(
        "Migrations completed ({}ms)",
        started_at.elapsed().as_millis()
    );

    let pool = Arc::new(database.pool().clone());

    let habit_repo =
        Arc::new(SqliteHabitRepository::new(pool.clone())) as Arc<dyn HabitRepository>;
    let completion_repo = Arc::new(SqliteCompletionRepository::new(pool.clone()))
        as Arc<dyn CompletionRepository>;

    let habit_queries = Arc::new(HabitQueries::new(
        habit_repo.clone(),
        completion_repo.clone(),
    ));
    let streak_queries = Arc::new(StreakQueries::new(
        habit_repo.clone(),
        completion_repo.clone(),
    ));

    // Initialize event bus and register event handlers
    let event_bus = Arc::new(InMemoryEventBus::new());
    let streak_refresh = Arc::new(StreakRefreshEventHandler::new(completion_repo.clone()));

    event_bus
        .subscribe::<HabitCompleted>(Arc::new(
            TypedEventHandlerWrapper::<HabitCompleted, _>::new(streak_refresh.as_ref().clone()),
        ))
        .await;
    event_bus
        .subscribe::<HabitDeleted>(Arc::new(
            TypedEventHandlerWrapper::<HabitDeleted, _>::new(streak_refresh.as_ref().clone()),
        ))
        .await;
    info!("Event bus initialized and handlers registered");

    let event_bus = event_bus as Arc<dyn EventBus>;

    let command_handlers = CommandHandlers {
        create_habit: Arc::new(CreateHabitCommandHandler::new(
            habit_repo.clone(),
            event_bus.clone(),
        )),
        complete_habit: Arc::new(CompleteHabitCommandHandler::new(
            habit_repo.clone(),
            completion_repo.clone(),
            event_bus.clone(),
        )),
        delete_habit: Arc::new(DeleteHabitCommandHandler::new(
            habit_repo.clone(),
            completion_repo.clone(),
            event_bus.clone(),
        )),
    };

    info!(
        "Application state ready ({}ms)",
        startup_started_at.elapsed().as_millis()
    );

    Ok(AppState {
        runtime: Runtime {
            pool,
            db: Arc::new(database),
            event_bus,
        },
        repositories: Repositories {
            habit: habit_repo,
            completion: completion_repo,
        },
        services: Services {
            config,
            streak_refresh,
        },
        queries: Queries {
            habit: habit_queries,
            streak: streak_queries,
        },
        command_handlers,
    })
}
