use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::{CreateHabitCommand, CreateHabitResult};
use streakboard_domain::events::habit_events::HabitCreated;
use streakboard_domain::events::EventBus;
use streakboard_domain::habit::{Habit, HabitRepository};
use streakboard_domain::shared::DomainError;

/// Create habit command handler
pub struct CreateHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl CreateHabitCommandHandler {
    pub fn new(habit_repo: Arc<dyn HabitRepository>, event_bus: Arc<dyn EventBus>) -> Self {
        Self {
            habit_repo,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<CreateHabitCommand> for CreateHabitCommandHandler {
    type Result = CreateHabitResult;

    async fn handle(&self, cmd: CreateHabitCommand) -> Result<Self::Result, DomainError> {
        info!("Handling CreateHabitCommand for user: {}", cmd.user_id);

        let habit = Habit::new(cmd.user_id, cmd.title, cmd.description, cmd.frequency)?;

        self.habit_repo.save(&habit).await?;

        info!(
            "Habit created successfully: {} ({})",
            habit.title(),
            habit.id()
        );

        let event = HabitCreated {
            habit_id: habit.id().clone(),
            user_id: habit.user_id().clone(),
            title: habit.title().to_string(),
            frequency: habit.frequency(),
            occurred_at: Utc::now(),
        };

        if let Err(e) = self.event_bus.publish(Box::new(event)).await {
            warn!("Failed to publish HabitCreated event: {}", e);
        }

        Ok(CreateHabitResult {
            habit_id: habit.id().as_str().to_string(),
        })
    }
}
