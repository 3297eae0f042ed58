use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use streakboard_domain::habit::Frequency;

/// Track habits and rank them by their streaks.
#[derive(Parser, Debug)]
#[command(name = "streakboard", version, about = "Habit streak tracker")]
pub struct Cli {
    /// Act as this user instead of the configured one
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// SQLite database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (default: <config dir>/streakboard/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also log to stderr at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage habits
    #[command(subcommand)]
    Habit(HabitCommands),

    /// Today's habits and whether each is done
    Today,

    /// Leaderboard of habits by best streak
    Streaks {
        /// Show only the first N entries
        #[arg(long)]
        top: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Streak statistics for one habit
    Streak {
        habit_id: String,

        #[arg(long)]
        json: bool,
    },

    /// Inspect or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum HabitCommands {
    /// Create a habit
    Add(AddHabitArgs),

    /// List your habits
    List,

    /// Mark a habit as done now
    Complete { habit_id: String },

    /// Delete a habit and its history
    Delete { habit_id: String },
}

#[derive(Args, Debug)]
pub struct AddHabitArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    /// daily, weekly or monthly
    #[arg(long, default_value = "daily")]
    pub frequency: Frequency,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Persist a new log level (error, warn, info, debug, trace)
    SetLogLevel { level: String },
}
