//! Plain-text and JSON rendering of query results.

use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

use crate::application::dtos::{HabitDto, HabitStreakDto, TodayHabitDto};
use crate::application::services::AppConfig;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn render_habits(habits: &[HabitDto]) -> String {
    if habits.is_empty() {
        return "No habits yet. Add one with `streakboard habit add`.".to_string();
    }

    let mut out = String::new();
    for habit in habits {
        let _ = writeln!(
            out,
            "{}  {} [{}] {}",
            habit.id, habit.title, habit.frequency, habit.description
        );
    }
    out.trim_end().to_string()
}

pub fn render_today(feed: &[TodayHabitDto]) -> String {
    if feed.is_empty() {
        return "Nothing to do today.".to_string();
    }

    let done = feed.iter().filter(|h| h.completed_today).count();
    let mut out = format!("Today: {}/{} done\n", done, feed.len());
    for entry in feed {
        let mark = if entry.completed_today { "x" } else { " " };
        let _ = writeln!(out, "[{}] {}  {}", mark, entry.habit.title, entry.habit.id);
    }
    out.trim_end().to_string()
}

pub fn render_leaderboard(entries: &[HabitStreakDto]) -> String {
    if entries.is_empty() {
        return "No habits to rank.".to_string();
    }

    let mut out = format!(
        "{:>4}  {:>4}  {:>7}  {:>5}  {}\n",
        "#", "best", "current", "total", "habit"
    );
    for entry in entries {
        let _ = writeln!(
            out,
            "{:>4}  {:>4}  {:>7}  {:>5}  {}",
            entry.rank.unwrap_or_default(),
            entry.best_streak,
            entry.current_streak,
            entry.total_completions,
            entry.title
        );
    }
    out.trim_end().to_string()
}

pub fn render_streak(entry: &HabitStreakDto) -> String {
    format!(
        "{}\n  current streak: {}\n  best streak: {}\n  completions: {}",
        entry.title, entry.current_streak, entry.best_streak, entry.total_completions
    )
}

pub fn render_config(config: &AppConfig, path: &Path) -> String {
    let database = config
        .database_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(default)".to_string());

    format!(
        "config file: {}\nlog level: {}\ndatabase: {}\nuser: {}",
        path.display(),
        config.log_level.as_str(),
        database,
        config.user_id.as_deref().unwrap_or("(not set)")
    )
}
