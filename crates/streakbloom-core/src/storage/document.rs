//! JSON document holding the full streak state.
//!
//! Shape: `{ "habits": [Habit], "freeze": { "available": n, "weekKey": "YYYY-Www" } }`.
//! Loading never fails on bad data: anything unreadable falls back to
//! defaults so a corrupt document cannot poison the engine.

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;

use super::store::KeyValueStore;
use crate::error::Result;
use crate::freeze::FreezeBank;
use crate::habit::Habit;
use crate::tracker::Tracker;

/// Key the document is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "streak-bloom";

impl Tracker {
    /// Serialize the whole state to its JSON document.
    ///
    /// # Errors
    /// Returns an error only if JSON encoding fails.
    pub fn serialize(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Rebuild state from a stored document, failing open to defaults.
    ///
    /// Malformed habits are dropped individually, a missing or malformed
    /// freeze bank becomes a full bank, and the bank is refreshed for `today`.
    pub fn deserialize(raw: Option<&str>, today: NaiveDate) -> Self {
        let Some(raw) = raw else {
            return Self::new(today);
        };

        let root = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(root)) => root,
            Ok(other) => {
                tracing::warn!(kind = json_kind(&other), "streak document is not an object; resetting");
                return Self::new(today);
            }
            Err(e) => {
                tracing::warn!(error = %e, "resetting unreadable streak document");
                return Self::new(today);
            }
        };

        let habits = match root.get("habits") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => restore_habits(entries),
            Some(other) => {
                tracing::warn!(kind = json_kind(other), "habits is not an array; dropping");
                Vec::new()
            }
        };

        let freeze = match root.get("freeze") {
            None | Some(Value::Null) => FreezeBank::new(today),
            Some(value) => serde_json::from_value::<FreezeBank>(value.clone()).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "resetting malformed freeze bank");
                FreezeBank::new(today)
            }),
        };

        let mut tracker = Self::from_parts(habits, freeze);
        tracker.refresh(today);
        tracker
    }
}

fn restore_habits(entries: &[Value]) -> Vec<Habit> {
    let mut seen = HashSet::new();
    let mut habits = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let habit = match serde_json::from_value::<Habit>(entry.clone()) {
            Ok(habit) => habit,
            Err(e) => {
                tracing::warn!(index, error = %e, "dropping malformed habit");
                continue;
            }
        };
        if !seen.insert(habit.id().to_string()) {
            tracing::warn!(id = habit.id(), "dropping habit with duplicate id");
            continue;
        }
        habits.push(habit);
    }
    habits
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Loads and saves the [`Tracker`] document through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct StateRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load state for `today`. Bad content falls back to defaults.
    ///
    /// # Errors
    /// Returns an error if the store itself cannot be read.
    pub fn load(&self, today: NaiveDate) -> Result<Tracker> {
        let raw = self.store.get(&self.key)?;
        Ok(Tracker::deserialize(raw.as_deref(), today))
    }

    /// Persist `tracker`.
    ///
    /// # Errors
    /// Returns an error if encoding or writing fails.
    pub fn save(&mut self, tracker: &Tracker) -> Result<()> {
        let document = tracker.serialize()?;
        self.store.set(&self.key, &document)?;
        Ok(())
    }
}
