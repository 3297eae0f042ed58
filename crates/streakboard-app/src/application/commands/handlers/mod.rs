mod complete_habit_handler;
mod create_habit_handler;
mod delete_habit_handler;


pub use complete_habit_handler::CompleteHabitCommandHandler;
pub use create_habit_handler::CreateHabitCommandHandler;
pub use delete_habit_handler::DeleteHabitCommandHandler;

use std::sync::Arc;
use streakboard_domain::habit::{Habit, HabitRepository};
use streakboard_domain::shared::{DomainError, HabitId, UserId};

/// Load a habit and check it belongs to the caller.
pub(crate) async fn load_owned_habit(
    habit_repo: &Arc<dyn HabitRepository>,
    habit_id: &HabitId,
    user_id: &UserId,
) -> Result<Habit, DomainError> {
    let habit = habit_repo
        .find_by_id(habit_id)
        .await?
        .ok_or_else(|| DomainError::HabitNotFound(habit_id.to_string()))?;

    if !habit.is_owned_by(user_id) {
        return Err(DomainError::NotOwner(habit_id.to_string()));
    }

    Ok(habit)
}
