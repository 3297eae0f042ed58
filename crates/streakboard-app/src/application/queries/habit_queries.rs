use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

use crate::application::dtos::{HabitDto, TodayHabitDto};
use crate::application::utils::start_of_local_day;
use streakboard_domain::completion::CompletionRepository;
use streakboard_domain::habit::HabitRepository;
use streakboard_domain::shared::{DomainError, UserId};

/// Habit query service
pub struct HabitQueries {
    habit_repo: Arc<dyn HabitRepository>,
    completion_repo: Arc<dyn CompletionRepository>,
}

impl HabitQueries {
    pub fn new(
        habit_repo: Arc<dyn HabitRepository>,
        completion_repo: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            habit_repo,
            completion_repo,
        }
    }

    pub async fn list_habits(&self, user_id: &UserId) -> Result<Vec<HabitDto>, DomainError> {
        let habits = self.habit_repo.find_by_user(user_id).await?;
        Ok(habits.iter().map(HabitDto::from).collect())
    }

    /// Every habit of the user, flagged with whether it was completed since
    /// local midnight of `now`'s day.
    pub async fn today_feed(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<TodayHabitDto>, DomainError> {
        let since = start_of_local_day(now);

        let habits = self.habit_repo.find_by_user(user_id).await?;
        let done: HashSet<String> = self
            .completion_repo
            .find_by_user_since(user_id, since)
            .await?
            .iter()
            .map(|c| c.habit_id().as_str().to_string())
            .collect();

        debug!(
            "today_feed user_id={} since={} habits={} done={}",
            user_id,
            since.to_rfc3339(),
            habits.len(),
            done.len()
        );

        Ok(habits
            .iter()
            .map(|habit| TodayHabitDto {
                habit: HabitDto::from(habit),
                completed_today: done.contains(habit.id().as_str()),
            })
            .collect())
    }
}
