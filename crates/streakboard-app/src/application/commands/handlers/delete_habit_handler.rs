use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use super::load_owned_habit;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::{DeleteHabitCommand, DeleteHabitResult};
use streakboard_domain::completion::CompletionRepository;
use streakboard_domain::events::habit_events::HabitDeleted;
use streakboard_domain::events::EventBus;
use streakboard_domain::habit::HabitRepository;
use streakboard_domain::shared::DomainError;

/// Delete habit command handler
pub struct DeleteHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    completion_repo: Arc<dyn CompletionRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl DeleteHabitCommandHandler {
    pub fn new(
        habit_repo: Arc<dyn HabitRepository>,
        completion_repo: Arc<dyn CompletionRepository>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            habit_repo,
            completion_repo,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<DeleteHabitCommand> for DeleteHabitCommandHandler {
    type Result = DeleteHabitResult;

    async fn handle(&self, cmd: DeleteHabitCommand) -> Result<Self::Result, DomainError> {
        info!("Handling DeleteHabitCommand for habit: {}", cmd.habit_id);

        let habit = load_owned_habit(&self.habit_repo, &cmd.habit_id, &cmd.user_id).await?;

        // Stores without cascading deletes would otherwise keep orphaned completions
        self.completion_repo.delete_by_habit(habit.id()).await?;
        self.habit_repo.delete(habit.id()).await?;

        info!("Habit deleted: {} ({})", habit.title(), habit.id());

        let event = HabitDeleted {
            habit_id: habit.id().clone(),
            user_id: habit.user_id().clone(),
            title: habit.title().to_string(),
            occurred_at: Utc::now(),
        };

        if let Err(e) = self.event_bus.publish(Box::new(event)).await {
            warn!("Failed to publish HabitDeleted event: {}", e);
        }

        Ok(DeleteHabitResult { success: true })
    }
}
