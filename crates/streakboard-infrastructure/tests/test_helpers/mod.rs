use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;
use streakboard_domain::habit::{Frequency, Habit};
use streakboard_domain::shared::UserId;
use streakboard_infrastructure::persistence::Database;

/// Migrated single-connection in-memory database
pub async fn setup_in_memory_db() -> SqlitePool {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    db.pool().clone()
}

#[allow(dead_code)]
pub fn new_habit(user: &UserId, title: &str) -> Habit {
    Habit::new(
        user.clone(),
        title.to_string(),
        format!("{} description", title),
        Frequency::Daily,
    )
    .expect("create habit")
}

#[allow(dead_code)]
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}
