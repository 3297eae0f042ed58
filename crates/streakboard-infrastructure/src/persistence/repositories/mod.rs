pub mod completion_repo;
pub mod habit_repo;

pub use completion_repo::SqliteCompletionRepository;
pub use habit_repo::SqliteHabitRepository;
