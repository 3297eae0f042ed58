use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::CompletionEvent;
use crate::shared::{DomainError, HabitId, UserId};

#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Save (upsert) a completion event.
    async fn save(&self, completion: &CompletionEvent) -> Result<(), DomainError>;

    /// All completions recorded by a user, across every habit.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<CompletionEvent>, DomainError>;

    /// Completions recorded by a user at or after `since`.
    async fn find_by_user_since(
        &self,
        user_id: &UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<CompletionEvent>, DomainError>;

    /// Completions of a single habit, oldest first.
    async fn find_by_habit(&self, habit_id: &HabitId) -> Result<Vec<CompletionEvent>, DomainError>;

    async fn delete_by_habit(&self, habit_id: &HabitId) -> Result<(), DomainError>;
}
