use async_trait::async_trait;

use super::Habit;
use crate::shared::{DomainError, HabitId, UserId};

#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Insert or update a habit.
    async fn save(&self, habit: &Habit) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &HabitId) -> Result<Option<Habit>, DomainError>;

    /// All habits owned by a user, oldest first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Habit>, DomainError>;

    /// Delete a habit. Its completions go with it.
    async fn delete(&self, id: &HabitId) -> Result<(), DomainError>;
}
