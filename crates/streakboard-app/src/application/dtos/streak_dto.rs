use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitStreakDto {
    /// 1-based leaderboard position; absent for single-habit lookups
    pub rank: Option<u32>,
    pub habit_id: String,
    pub title: String,
    pub description: String,
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_completions: u32,
}
