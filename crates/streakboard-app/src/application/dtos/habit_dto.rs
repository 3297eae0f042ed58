use serde::{Deserialize, Serialize};
use streakboard_domain::habit::Habit;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub frequency: String,
    pub streak_count: u32,
    pub last_completed: Option<String>, // RFC 3339
    pub created_at: String,             // RFC 3339
}

impl From<&Habit> for HabitDto {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id().as_str().to_string(),
            title: habit.title().to_string(),
            description: habit.description().to_string(),
            frequency: habit.frequency().as_str().to_string(),
            streak_count: habit.streak_count(),
            last_completed: habit.last_completed().map(|t| t.to_rfc3339()),
            created_at: habit.created_at().to_rfc3339(),
        }
    }
}

/// Entry in the daily habit feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayHabitDto {
    #[serde(flatten)]
    pub habit: HabitDto,
    pub completed_today: bool,
}
