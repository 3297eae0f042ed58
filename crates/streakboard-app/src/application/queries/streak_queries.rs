use log::info;
use std::sync::Arc;

use crate::application::dtos::HabitStreakDto;
use streakboard_domain::completion::CompletionRepository;
use streakboard_domain::habit::{Habit, HabitRepository};
use streakboard_domain::shared::{DomainError, HabitId, UserId};
use streakboard_domain::streak::{RankedHabit, StreakCalculator, StreakResult};

/// Streak read model. Nothing is cached; every call derives from the
/// completion history.
pub struct StreakQueries {
    habit_repo: Arc<dyn HabitRepository>,
    completion_repo: Arc<dyn CompletionRepository>,
}

impl StreakQueries {
    pub fn new(
        habit_repo: Arc<dyn HabitRepository>,
        completion_repo: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            habit_repo,
            completion_repo,
        }
    }

    /// Get streak statistics for a single habit
    pub async fn get_habit_streak(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
    ) -> Result<HabitStreakDto, DomainError> {
        let habit = self
            .habit_repo
            .find_by_id(habit_id)
            .await?
            .ok_or_else(|| DomainError::HabitNotFound(habit_id.to_string()))?;

        if !habit.is_owned_by(user_id) {
            return Err(DomainError::NotOwner(habit_id.to_string()));
        }

        let completions = self.completion_repo.find_by_user(user_id).await?;
        let streak = StreakCalculator::compute_streak(habit.id(), &completions);

        info!(
            "[streak] get_habit_streak habit_id={} current={} best={} total={}",
            habit.id(),
            streak.current_streak,
            streak.best_streak,
            streak.total_completions
        );

        Ok(to_dto(&habit, None, streak))
    }

    /// Rank all of a user's habits by best streak
    pub async fn get_leaderboard(&self, user_id: &UserId) -> Result<Vec<HabitStreakDto>, DomainError> {
        let habits = self.habit_repo.find_by_user(user_id).await?;
        let completions = self.completion_repo.find_by_user(user_id).await?;

        let ranked = StreakCalculator::rank_habits(&habits, &completions);

        let dtos: Vec<HabitStreakDto> = ranked
            .iter()
            .zip(1u32..)
            .map(|(entry, rank)| ranked_to_dto(entry, rank))
            .collect();

        info!(
            "[streak] get_leaderboard user_id={} habits={} completions={}",
            user_id,
            dtos.len(),
            completions.len()
        );

        Ok(dtos)
    }
}

fn to_dto(habit: &Habit, rank: Option<u32>, streak: StreakResult) -> HabitStreakDto {
    HabitStreakDto {
        rank,
        habit_id: habit.id().as_str().to_string(),
        title: habit.title().to_string(),
        description: habit.description().to_string(),
        current_streak: streak.current_streak,
        best_streak: streak.best_streak,
        total_completions: streak.total_completions,
    }
}

fn ranked_to_dto(entry: &RankedHabit<'_>, rank: u32) -> HabitStreakDto {
    to_dto(
        entry.habit,
        Some(rank),
        StreakResult {
            current_streak: entry.streak,
            best_streak: entry.best_streak,
            total_completions: entry.total,
        },
    )
}
