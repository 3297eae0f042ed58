use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::Frequency;
use crate::shared::{DomainError, HabitId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    id: HabitId,
    user_id: UserId,
    title: String,
    description: String,
    frequency: Frequency,
    // Mirror bumped on every completion; streaks are derived from completions instead.
    streak_count: u32,
    last_completed: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(
        user_id: UserId,
        title: String,
        description: String,
        frequency: Frequency,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::Validation(
                "Habit title cannot be empty".to_string(),
            ));
        }

        if description.trim().is_empty() {
            return Err(DomainError::Validation(
                "Habit description cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: HabitId::new(),
            user_id,
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            frequency,
            streak_count: 0,
            last_completed: None,
            created_at: Utc::now(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: HabitId,
        user_id: UserId,
        title: String,
        description: String,
        frequency: Frequency,
        streak_count: u32,
        last_completed: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            description,
            frequency,
            streak_count,
            last_completed,
            created_at,
        }
    }

    pub fn id(&self) -> &HabitId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn streak_count(&self) -> u32 {
        self.streak_count
    }

    pub fn last_completed(&self) -> Option<DateTime<Utc>> {
        self.last_completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Update the stored mirror after a completion was recorded.
    pub fn record_completion(&mut self, completed_at: DateTime<Utc>) {
        self.streak_count = self.streak_count.saturating_add(1);
        self.last_completed = Some(completed_at);
    }
}
