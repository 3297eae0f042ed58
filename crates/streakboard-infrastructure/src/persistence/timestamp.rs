use chrono::{DateTime, SecondsFormat, Utc};
use streakboard_domain::completion::CompletionEvent;
use streakboard_domain::shared::DomainError;

/// Fixed-width UTC text so that string order matches time order in SQL comparisons.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp. A bad value in the table is a data integrity problem.
pub fn parse_timestamp(raw: &str, column: &str) -> Result<DateTime<Utc>, DomainError> {
    CompletionEvent::parse_completed_at(raw)
        .map_err(|e| DomainError::DataIntegrity(format!("{}: {}", column, e.message())))
}
