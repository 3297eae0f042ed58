use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::events::DomainEvent;
use crate::habit::Frequency;
use crate::shared::{CompletionId, HabitId, UserId};

/// Macro to implement DomainEvent trait with type name
macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Event fired when a habit is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCreated {
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub title: String,
    pub frequency: Frequency,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HabitCreated);

/// Event fired when a habit document changes (details or streak mirror)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitUpdated {
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub streak_count: u32,
    pub last_completed: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HabitUpdated);

/// Event fired when a habit is deleted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitDeleted {
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub title: String,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HabitDeleted);

/// Event fired when a completion is recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCompleted {
    pub completion_id: CompletionId,
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub completed_at: DateTime<Utc>,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HabitCompleted);
