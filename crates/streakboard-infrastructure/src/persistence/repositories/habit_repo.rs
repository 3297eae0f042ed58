use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::{format_timestamp, parse_timestamp, SqliteRepositoryBase};
use streakboard_domain::habit::{Frequency, Habit, HabitRepository};
use streakboard_domain::shared::{DomainError, HabitId, UserId};

#[derive(FromRow)]
struct HabitRow {
    id: String,
    user_id: String,
    title: String,
    description: String,
    frequency: String,
    streak_count: i64,
    last_completed: Option<String>,
    created_at: String,
}

impl HabitRow {
    fn try_into_habit(self) -> Result<Habit, DomainError> {
        let frequency: Frequency = self.frequency.parse().map_err(|e: DomainError| {
            DomainError::DataIntegrity(format!("habits.frequency: {}", e.message()))
        })?;
        let last_completed = self
            .last_completed
            .as_deref()
            .map(|raw| parse_timestamp(raw, "habits.last_completed"))
            .transpose()?;
        let created_at = parse_timestamp(&self.created_at, "habits.created_at")?;

        Ok(Habit::restore(
            HabitId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            self.title,
            self.description,
            frequency,
            self.streak_count.max(0) as u32,
            last_completed,
            created_at,
        ))
    }
}

const SELECT_HABIT: &str = r#"
    SELECT
        id,
        user_id,
        title,
        description,
        frequency,
        streak_count,
        last_completed,
        created_at
    FROM habits
"#;

pub struct SqliteHabitRepository {
    base: SqliteRepositoryBase,
}

impl SqliteHabitRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl HabitRepository for SqliteHabitRepository {
    async fn save(&self, habit: &Habit) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO habits (
                id,
                user_id,
                title,
                description,
                frequency,
                streak_count,
                last_completed,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                title = ?3,
                description = ?4,
                frequency = ?5,
                streak_count = ?6,
                last_completed = ?7
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(habit.id().as_str().to_string())
                    .bind(habit.user_id().as_str().to_string())
                    .bind(habit.title().to_string())
                    .bind(habit.description().to_string())
                    .bind(habit.frequency().as_str())
                    .bind(habit.streak_count() as i64)
                    .bind(habit.last_completed().map(format_timestamp))
                    .bind(format_timestamp(habit.created_at())),
                "Save habit",
            )
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &HabitId) -> Result<Option<Habit>, DomainError> {
        let query = format!("{} WHERE id = ?1", SELECT_HABIT);

        let row: Option<HabitRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(id.as_str().to_string()),
                "Find habit by ID",
            )
            .await?;

        row.map(|r| r.try_into_habit()).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Habit>, DomainError> {
        let query = format!(
            "{} WHERE user_id = ?1 ORDER BY created_at ASC, id ASC",
            SELECT_HABIT
        );

        let rows: Vec<HabitRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query).bind(user_id.as_str().to_string()),
                "List habits by user",
            )
            .await?;

        rows.into_iter().map(|r| r.try_into_habit()).collect()
    }

    async fn delete(&self, id: &HabitId) -> Result<(), DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM habits WHERE id = ?1").bind(id.as_str().to_string()),
                "Delete habit",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::HabitNotFound(id.to_string()));
        }

        Ok(())
    }
}
