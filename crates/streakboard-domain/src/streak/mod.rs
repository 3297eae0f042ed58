mod domain_service;
mod types;

pub use domain_service::{StreakCalculator, CONTIGUOUS_GAP_DAYS};
pub use types::{RankedHabit, StreakResult};
