mod habit_queries;
mod streak_queries;

pub use habit_queries::HabitQueries;
pub use streak_queries::StreakQueries;
