use async_trait::async_trait;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use streakboard_domain::completion::CompletionRepository;
use streakboard_domain::events::habit_events::{HabitCompleted, HabitDeleted};
use streakboard_domain::events::EventHandler;
use streakboard_domain::shared::{DomainError, HabitId};
use streakboard_domain::streak::{StreakCalculator, StreakResult};

/// Recomputes a habit's streak whenever it is completed, keeping the latest
/// figures per habit for the rest of the process.
#[derive(Clone)]
pub struct StreakRefreshEventHandler {
    completion_repo: Arc<dyn CompletionRepository>,
    latest: Arc<RwLock<HashMap<HabitId, StreakResult>>>,
}

impl StreakRefreshEventHandler {
    pub fn new(completion_repo: Arc<dyn CompletionRepository>) -> Self {
        Self {
            completion_repo,
            latest: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Last streak computed for `habit_id` in this process, if any
    pub async fn latest(&self, habit_id: &HabitId) -> Option<StreakResult> {
        self.latest.read().await.get(habit_id).copied()
    }
}

#[async_trait]
impl EventHandler<HabitCompleted> for StreakRefreshEventHandler {
    async fn handle(&self, event: &HabitCompleted) -> Result<(), DomainError> {
        let completions = self.completion_repo.find_by_user(&event.user_id).await?;
        let streak = StreakCalculator::compute_streak(&event.habit_id, &completions);

        info!(
            "[streak] refreshed habit_id={} current={} best={} total={}",
            event.habit_id, streak.current_streak, streak.best_streak, streak.total_completions
        );

        self.latest
            .write()
            .await
            .insert(event.habit_id.clone(), streak);
        Ok(())
    }
}

#[async_trait]
impl EventHandler<HabitDeleted> for StreakRefreshEventHandler {
    async fn handle(&self, event: &HabitDeleted) -> Result<(), DomainError> {
        if self.latest.write().await.remove(&event.habit_id).is_some() {
            info!("[streak] dropped cached streak habit_id={}", event.habit_id);
        }
        Ok(())
    }
}
