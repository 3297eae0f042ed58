use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use super::load_owned_habit;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::{CompleteHabitCommand, CompleteHabitResult};
use crate::application::utils::local_day_window;
use streakboard_domain::completion::{CompletionEvent, CompletionRepository};
use streakboard_domain::events::habit_events::{HabitCompleted, HabitUpdated};
use streakboard_domain::events::EventBus;
use streakboard_domain::habit::HabitRepository;
use streakboard_domain::shared::DomainError;

/// Complete habit command handler
///
/// At most one completion per habit per local calendar day.
pub struct CompleteHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    completion_repo: Arc<dyn CompletionRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl CompleteHabitCommandHandler {
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
impl CommandHandler<CompleteHabitCommand> for CompleteHabitCommandHandler {
    type Result = CompleteHabitResult;

    async fn handle(&self, cmd: CompleteHabitCommand) -> Result<Self::Result, DomainError> {
        info!("Handling CompleteHabitCommand for habit: {}", cmd.habit_id);

        // 1. Load habit and check ownership
        let mut habit = load_owned_habit(&self.habit_repo, &cmd.habit_id, &cmd.user_id).await?;

        // 2. Reject a second completion on the same day
        let (day_start, day_end) = local_day_window(cmd.completed_at);
        let already_done = self
            .completion_repo
            .find_by_user_since(&cmd.user_id, day_start)
            .await?
            .iter()
            .any(|c| c.habit_id() == habit.id() && c.completed_at() < day_end);

        if already_done {
            return Err(DomainError::AlreadyCompleted(format!(
                "{} ({})",
                habit.title(),
                habit.id()
            )));
        }

        // 3. Record completion, then bump the habit's mirror fields
        let completion =
            CompletionEvent::new(habit.id().clone(), cmd.user_id.clone(), cmd.completed_at);
        self.completion_repo.save(&completion).await?;

        // The completion is the source of truth; a stale mirror must not fail the command
        habit.record_completion(cmd.completed_at);
        if let Err(e) = self.habit_repo.save(&habit).await {
            warn!(
                "Failed to update streak mirror for habit {}: {}",
                habit.id(),
                e.format_with_code()
            );
        }

        info!(
            "Habit completed: {} ({}) streak_count={}",
            habit.title(),
            habit.id(),
            habit.streak_count()
        );

        // 4. Notify subscribers
        let now = Utc::now();
        let updated = HabitUpdated {
            habit_id: habit.id().clone(),
            user_id: habit.user_id().clone(),
            streak_count: habit.streak_count(),
            last_completed: habit.last_completed(),
            occurred_at: now,
        };
        let completed = HabitCompleted {
            completion_id: completion.id().clone(),
            habit_id: habit.id().clone(),
            user_id: habit.user_id().clone(),
            completed_at: completion.completed_at(),
            occurred_at: now,
        };

        if let Err(e) = self.event_bus.publish(Box::new(updated)).await {
            warn!("Failed to publish HabitUpdated event: {}", e);
        }
        if let Err(e) = self.event_bus.publish(Box::new(completed)).await {
            warn!("Failed to publish HabitCompleted event: {}", e);
        }

        Ok(CompleteHabitResult {
            completion_id: completion.id().as_str().to_string(),
            habit_id: habit.id().as_str().to_string(),
            completed_at: completion.completed_at().to_rfc3339(),
            streak_count: habit.streak_count(),
        })
    }
}
