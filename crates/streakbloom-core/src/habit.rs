//! Daily habits and their streak state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A daily-cadence habit.
///
/// `streak == 0` exactly when `last_check_in` is `None`. The streak fields are
/// only changed by the engine in [`crate::streak`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredHabit")]
pub struct Habit {
    id: String,
    name: String,
    emoji: String,
    streak: u32,
    last_check_in: Option<NaiveDate>,
}

impl Habit {
    /// Create a fresh habit with a new UUID.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` or `emoji` is blank.
    pub fn new(name: &str, emoji: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let emoji = emoji.trim();
        if emoji.is_empty() {
            return Err(ValidationError::EmptyEmoji);
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            emoji: emoji.to_string(),
            streak: 0,
            last_check_in: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display marker. May be empty for habits loaded from older documents.
    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_check_in(&self) -> Option<NaiveDate> {
        self.last_check_in
    }

    /// Record a check-in on `day` with the resulting streak.
    pub(crate) fn record_check_in(&mut self, day: NaiveDate, streak: u32) {
        debug_assert!(streak >= 1);
        self.streak = streak;
        self.last_check_in = Some(day);
    }

    /// Move the recorded check-in date without touching the streak.
    pub(crate) fn shift_last_check_in(&mut self, day: NaiveDate) {
        debug_assert!(self.last_check_in.is_some());
        self.last_check_in = Some(day);
    }
}

/// Wire shape accepted from storage.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredHabit {
    id: String,
    name: String,
    #[serde(default)]
    emoji: String,
    #[serde(default)]
    streak: i64,
    #[serde(default)]
    last_check_in: Option<NaiveDate>,
}

impl TryFrom<StoredHabit> for Habit {
    type Error = String;

    fn try_from(stored: StoredHabit) -> Result<Self, Self::Error> {
        if stored.id.trim().is_empty() {
            return Err("habit id is empty".into());
        }
        if stored.name.trim().is_empty() {
            return Err(format!("habit {} has an empty name", stored.id));
        }

        let streak = match (stored.last_check_in, stored.streak) {
            (None, 0) => 0,
            (None, n) => {
                tracing::warn!(id = %stored.id, streak = n, "streak without a check-in date; reset to 0");
                0
            }
            (Some(_), n) if n < 1 => {
                tracing::warn!(id = %stored.id, streak = n, "check-in date with empty streak; set to 1");
                1
            }
            (Some(_), n) => u32::try_from(n).unwrap_or(u32::MAX),
        };

        Ok(Self {
            id: stored.id,
            name: stored.name,
            emoji: stored.emoji.trim().to_string(),
            streak,
            last_check_in: stored.last_check_in,
        })
    }
}
