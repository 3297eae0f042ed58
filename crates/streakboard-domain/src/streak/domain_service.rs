use chrono::{DateTime, Utc};

use super::types::{RankedHabit, StreakResult};
use crate::completion::CompletionEvent;
use crate::habit::Habit;
use crate::shared::HabitId;

/// Two completions at most this many days apart belong to the same run.
pub const CONTIGUOUS_GAP_DAYS: f64 = 1.5;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Domain service deriving streaks from completion history.
/// Pure functions over in-memory lists; inputs are never mutated.
pub struct StreakCalculator;

impl StreakCalculator {
    /// Compute streak statistics for one habit out of a user's full completion list.
    pub fn compute_streak(habit_id: &HabitId, all_completions: &[CompletionEvent]) -> StreakResult {
        let mut timestamps: Vec<DateTime<Utc>> = all_completions
            .iter()
            .filter(|c| c.habit_id() == habit_id)
            .map(|c| c.completed_at())
            .collect();

        if timestamps.is_empty() {
            return StreakResult::default();
        }

        timestamps.sort();

        let mut current_run = 0u32;
        let mut best_streak = 0u32;
        let mut last: Option<DateTime<Utc>> = None;

        for completed_at in &timestamps {
            current_run = match last {
                Some(prev) if gap_days(prev, *completed_at) <= CONTIGUOUS_GAP_DAYS => {
                    current_run + 1
                }
                _ => 1,
            };

            best_streak = best_streak.max(current_run);
            last = Some(*completed_at);
        }

        StreakResult {
            current_streak: current_run,
            best_streak,
            total_completions: timestamps.len() as u32,
        }
    }

    /// Rank habits by best streak, highest first.
    ///
    /// Ties are broken by habit id so the order does not depend on how the
    /// habits were listed.
    pub fn rank_habits<'a>(
        habits: &'a [Habit],
        all_completions: &[CompletionEvent],
    ) -> Vec<RankedHabit<'a>> {
        let mut ranked: Vec<RankedHabit<'a>> = habits
            .iter()
            .map(|habit| {
                let result = Self::compute_streak(habit.id(), all_completions);
                RankedHabit {
                    habit,
                    streak: result.current_streak,
                    best_streak: result.best_streak,
                    total: result.total_completions,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.best_streak
                .cmp(&a.best_streak)
                .then_with(|| a.habit.id().cmp(b.habit.id()))
        });

        ranked
    }
}

fn gap_days(prev: DateTime<Utc>, next: DateTime<Utc>) -> f64 {
    (next - prev).num_milliseconds() as f64 / MILLIS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::Frequency;
    use crate::shared::UserId;
    use chrono::{Duration, TimeZone};

    fn day_one() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
    }

    fn habit(id: &str, title: &str) -> Habit {
        Habit::restore(
            HabitId::from_string(id),
            UserId::from_string("user-1"),
            title.to_string(),
            format!("{} every day", title),
            Frequency::Daily,
            0,
            None,
            day_one(),
        )
    }

    fn completion(habit_id: &str, at: DateTime<Utc>) -> CompletionEvent {
        CompletionEvent::new(
            HabitId::from_string(habit_id),
            UserId::from_string("user-1"),
            at,
        )
    }

    fn daily_run(habit_id: &str, start: DateTime<Utc>, days: i64) -> Vec<CompletionEvent> {
        (0..days)
            .map(|d| completion(habit_id, start + Duration::days(d)))
            .collect()
    }

    fn result(current: u32, best: u32, total: u32) -> StreakResult {
        StreakResult {
            current_streak: current,
            best_streak: best,
            total_completions: total,
        }
    }

    #[test]
    fn test_no_completions() {
        let id = HabitId::from_string("water");
        assert_eq!(StreakCalculator::compute_streak(&id, &[]), result(0, 0, 0));
    }

    #[test]
    fn test_completions_of_other_habits_only() {
        let completions = daily_run("read", day_one(), 4);
        let id = HabitId::from_string("water");

        assert_eq!(StreakCalculator::compute_streak(&id, &completions), result(0, 0, 0));
    }

    #[test]
    fn test_single_completion() {
        let completions = vec![completion("water", day_one())];
        let id = HabitId::from_string("water");

        assert_eq!(StreakCalculator::compute_streak(&id, &completions), result(1, 1, 1));
    }

    #[test]
    fn test_three_consecutive_days() {
        let completions = daily_run("water", day_one(), 3);
        let id = HabitId::from_string("water");

        assert_eq!(StreakCalculator::compute_streak(&id, &completions), result(3, 3, 3));
    }

    #[test]
    fn test_gap_resets_current_but_keeps_best() {
        let mut completions = daily_run("read", day_one(), 2);
        completions.push(completion("read", day_one() + Duration::days(9)));
        let id = HabitId::from_string("read");

        assert_eq!(StreakCalculator::compute_streak(&id, &completions), result(1, 2, 3));
    }

    #[test]
    fn test_thirty_hour_gap_is_contiguous() {
        let completions = vec![
            completion("exercise", day_one()),
            completion("exercise", day_one() + Duration::hours(30)),
        ];
        let id = HabitId::from_string("exercise");

        assert_eq!(StreakCalculator::compute_streak(&id, &completions), result(2, 2, 2));
    }

    #[test]
    fn test_forty_hour_gap_breaks_run() {
        let completions = vec![
            completion("meditate", day_one()),
            completion("meditate", day_one() + Duration::hours(40)),
        ];
        let id = HabitId::from_string("meditate");

        assert_eq!(StreakCalculator::compute_streak(&id, &completions), result(1, 1, 2));
    }

    #[test]
    fn test_gap_of_exactly_threshold_is_contiguous() {
        let completions = vec![
            completion("walk", day_one()),
            completion("walk", day_one() + Duration::hours(36)),
        ];
        let id = HabitId::from_string("walk");

        assert_eq!(StreakCalculator::compute_streak(&id, &completions), result(2, 2, 2));
    }

    #[test]
    fn test_best_streak_is_longest_run_not_last() {
        let mut completions = daily_run("stretch", day_one(), 5);
        completions.extend(daily_run("stretch", day_one() + Duration::days(10), 2));
        completions.extend(daily_run("stretch", day_one() + Duration::days(20), 3));
        let id = HabitId::from_string("stretch");

        let streak = StreakCalculator::compute_streak(&id, &completions);

        assert_eq!(streak, result(3, 5, 10));
        assert!(streak.best_streak > streak.current_streak);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut completions = daily_run("read", day_one(), 4);
        completions.push(completion("read", day_one() + Duration::days(12)));
        completions.extend(daily_run("water", day_one(), 2));
        let id = HabitId::from_string("read");

        let forward = StreakCalculator::compute_streak(&id, &completions);
        let mut reversed = completions.clone();
        reversed.reverse();
        let backward = StreakCalculator::compute_streak(&id, &reversed);

        assert_eq!(forward, backward);
        assert_eq!(forward, result(1, 4, 5));
    }

    #[test]
    fn test_duplicate_timestamps_are_counted() {
        let completions = vec![
            completion("water", day_one()),
            completion("water", day_one()),
            completion("water", day_one() + Duration::hours(2)),
        ];
        let id = HabitId::from_string("water");

        let streak = StreakCalculator::compute_streak(&id, &completions);

        assert_eq!(streak.total_completions, 3);
        assert_eq!(streak.best_streak, 3);
    }

    #[test]
    fn test_compute_streak_does_not_mutate_input() {
        let completions = vec![
            completion("water", day_one() + Duration::days(2)),
            completion("water", day_one()),
        ];
        let before = completions.clone();

        StreakCalculator::compute_streak(&HabitId::from_string("water"), &completions);

        assert_eq!(completions, before);
    }

    #[test]
    fn test_rank_habits_orders_by_best_streak() {
        let habits = vec![
            habit("a", "Five"),
            habit("b", "Two"),
            habit("c", "Eight"),
        ];
        let mut completions = daily_run("a", day_one(), 5);
        completions.extend(daily_run("b", day_one(), 2));
        completions.extend(daily_run("c", day_one(), 8));

        let ranked = StreakCalculator::rank_habits(&habits, &completions);

        let bests: Vec<u32> = ranked.iter().map(|r| r.best_streak).collect();
        assert_eq!(bests, vec![8, 5, 2]);
        assert_eq!(ranked[0].habit.title(), "Eight");
        assert_eq!(ranked[0].total, 8);
        assert_eq!(ranked[2].streak, 2);
    }

    #[test]
    fn test_rank_habits_is_non_increasing() {
        let habits: Vec<Habit> = (0..6).map(|i| habit(&format!("h{}", i), "Habit")).collect();
        let mut completions = Vec::new();
        for (i, len) in [3i64, 0, 7, 1, 7, 4].iter().enumerate() {
            completions.extend(daily_run(&format!("h{}", i), day_one(), *len));
        }

        let ranked = StreakCalculator::rank_habits(&habits, &completions);

        assert_eq!(ranked.len(), 6);
        for pair in ranked.windows(2) {
            assert!(pair[0].best_streak >= pair[1].best_streak);
        }
    }

    #[test]
    fn test_rank_habits_breaks_ties_by_id() {
        let habits = vec![habit("zeta", "Z"), habit("alpha", "A"), habit("mid", "M")];
        let mut completions = daily_run("zeta", day_one(), 2);
        completions.extend(daily_run("alpha", day_one(), 2));
        completions.extend(daily_run("mid", day_one(), 2));

        let ranked = StreakCalculator::rank_habits(&habits, &completions);
        let ids: Vec<&str> = ranked.iter().map(|r| r.habit.id().as_str()).collect();

        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_rank_habits_without_completions() {
        let habits = vec![habit("a", "A")];

        let ranked = StreakCalculator::rank_habits(&habits, &[]);

        assert_eq!(ranked.len(), 1);
        assert_eq!((ranked[0].streak, ranked[0].best_streak, ranked[0].total), (0, 0, 0));
    }

    #[test]
    fn test_rank_habits_empty() {
        assert!(StreakCalculator::rank_habits(&[], &[]).is_empty());
    }
}
