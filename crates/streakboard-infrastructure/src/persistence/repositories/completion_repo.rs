use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::{format_timestamp, parse_timestamp, SqliteRepositoryBase};
use streakboard_domain::completion::{CompletionEvent, CompletionRepository};
use streakboard_domain::shared::{CompletionId, DomainError, HabitId, UserId};

#[derive(FromRow)]
struct CompletionRow {
    id: String,
    habit_id: String,
    user_id: String,
    completed_at: String,
}

impl CompletionRow {
    fn try_into_completion(self) -> Result<CompletionEvent, DomainError> {
        let completed_at = parse_timestamp(&self.completed_at, "habit_completions.completed_at")?;

        Ok(CompletionEvent::restore(
            CompletionId::from_string(&self.id),
            HabitId::from_string(&self.habit_id),
            UserId::from_string(&self.user_id),
            completed_at,
        ))
    }
}

fn into_completions(rows: Vec<CompletionRow>) -> Result<Vec<CompletionEvent>, DomainError> {
    rows.into_iter().map(|r| r.try_into_completion()).collect()
}

pub struct SqliteCompletionRepository {
    base: SqliteRepositoryBase,
}

impl SqliteCompletionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl CompletionRepository for SqliteCompletionRepository {
    async fn save(&self, completion: &CompletionEvent) -> Result<(), DomainError> {
        let query = r#"
            INSERT OR REPLACE INTO habit_completions (
                id,
                habit_id,
                user_id,
                completed_at
            ) VALUES (?1, ?2, ?3, ?4)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(completion.id().as_str().to_string())
                    .bind(completion.habit_id().as_str().to_string())
                    .bind(completion.user_id().as_str().to_string())
                    .bind(format_timestamp(completion.completed_at())),
                "Save completion",
            )
            .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<CompletionEvent>, DomainError> {
        let query = r#"
            SELECT id, habit_id, user_id, completed_at
            FROM habit_completions
            WHERE user_id = ?1
            ORDER BY completed_at ASC
        "#;

        let rows: Vec<CompletionRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(user_id.as_str().to_string()),
                "List completions by user",
            )
            .await?;

        into_completions(rows)
    }

    async fn find_by_user_since(
        &self,
        user_id: &UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<CompletionEvent>, DomainError> {
        let query = r#"
            SELECT id, habit_id, user_id, completed_at
            FROM habit_completions
            WHERE user_id = ?1 AND completed_at >= ?2
            ORDER BY completed_at ASC
        "#;

        let rows: Vec<CompletionRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(user_id.as_str().to_string())
                    .bind(format_timestamp(since)),
                "List completions by user since",
            )
            .await?;

        into_completions(rows)
    }

    async fn find_by_habit(&self, habit_id: &HabitId) -> Result<Vec<CompletionEvent>, DomainError> {
        let query = r#"
            SELECT id, habit_id, user_id, completed_at
            FROM habit_completions
            WHERE habit_id = ?1
            ORDER BY completed_at ASC
        "#;

        let rows: Vec<CompletionRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(habit_id.as_str().to_string()),
                "List completions by habit",
            )
            .await?;

        into_completions(rows)
    }

    async fn delete_by_habit(&self, habit_id: &HabitId) -> Result<(), DomainError> {
        self.base
            .execute(
                sqlx::query("DELETE FROM habit_completions WHERE habit_id = ?1")
                    .bind(habit_id.as_str().to_string()),
                "Delete completions by habit",
            )
            .await?;

        Ok(())
    }
}
