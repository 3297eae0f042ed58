use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{CompletionId, DomainError, HabitId, UserId};

/// A record that a habit was completed at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEvent {
    id: CompletionId,
    habit_id: HabitId,
    user_id: UserId,
    completed_at: DateTime<Utc>,
}

impl CompletionEvent {
    pub fn new(habit_id: HabitId, user_id: UserId, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: CompletionId::new(),
            habit_id,
            user_id,
            completed_at,
        }
    }

    pub fn restore(
        id: CompletionId,
        habit_id: HabitId,
        user_id: UserId,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            habit_id,
            user_id,
            completed_at,
        }
    }

    /// Parse an RFC 3339 timestamp as stored by the document store.
    ///
    /// Malformed values are rejected here so the streak calculator only ever
    /// sees well-formed instants.
    pub fn parse_completed_at(raw: &str) -> Result<DateTime<Utc>, DomainError> {
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                DomainError::Validation(format!("Invalid completed_at '{}': {}", raw, e))
            })
    }

    pub fn id(&self) -> &CompletionId {
        &self.id
    }

    pub fn habit_id(&self) -> &HabitId {
        &self.habit_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_completed_at_utc() {
        let parsed = CompletionEvent::parse_completed_at("2025-03-01T08:30:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_completed_at_normalizes_offset() {
        let parsed = CompletionEvent::parse_completed_at("2025-03-01T10:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_completed_at_rejects_garbage() {
        match CompletionEvent::parse_completed_at("yesterday-ish") {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("yesterday-ish")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_completion_gets_fresh_id() {
        let habit_id = HabitId::new();
        let user_id = UserId::new();
        let a = CompletionEvent::new(habit_id.clone(), user_id.clone(), Utc::now());
        let b = CompletionEvent::new(habit_id.clone(), user_id, Utc::now());

        assert_ne!(a.id(), b.id());
        assert_eq!(a.habit_id(), &habit_id);
    }
}
