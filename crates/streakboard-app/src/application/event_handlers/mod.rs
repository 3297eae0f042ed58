mod streak_refresh_handler;

pub use streak_refresh_handler::StreakRefreshEventHandler;
