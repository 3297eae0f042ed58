use serde::{Deserialize, Serialize};

use crate::habit::Habit;

/// Streak statistics derived from one habit's completion history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakResult {
    /// Length of the last contiguous run in the history, not whether it is still alive today.
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_completions: u32,
}

/// A habit paired with its streak fields, as ranked on the leaderboard.
#[derive(Debug, Clone)]
pub struct RankedHabit<'a> {
    pub habit: &'a Habit,
    pub streak: u32,
    pub best_streak: u32,
    pub total: u32,
}
