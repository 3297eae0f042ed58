use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use streakboard_domain::habit::Frequency;
use streakboard_domain::shared::{HabitId, UserId};

use super::command_handler::Command;

/// Create a new habit for a user
#[derive(Debug, Clone)]
pub struct CreateHabitCommand {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub frequency: Frequency,
}

impl Command for CreateHabitCommand {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHabitResult {
    pub habit_id: String,
}

/// Record that a habit was completed at `completed_at`
#[derive(Debug, Clone)]
pub struct CompleteHabitCommand {
    pub user_id: UserId,
    pub habit_id: HabitId,
    pub completed_at: DateTime<Utc>,
}

impl Command for CompleteHabitCommand {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteHabitResult {
    pub completion_id: String,
    pub habit_id: String,
    pub completed_at: String,
    pub streak_count: u32,
}

/// Delete a habit together with its completion history
#[derive(Debug, Clone)]
pub struct DeleteHabitCommand {
    pub user_id: UserId,
    pub habit_id: HabitId,
}

impl Command for DeleteHabitCommand {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteHabitResult {
    pub success: bool,
}
