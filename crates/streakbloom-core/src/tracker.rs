//! Whole-application streak state.
//!
//! `Tracker` owns every habit plus the shared freeze bank and is the entry
//! point callers use. Each operation takes `today` and refreshes the bank for
//! it before deciding anything, so a new week's freezes are never missed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::HabitError;
use crate::freeze::FreezeBank;
use crate::habit::Habit;
use crate::streak::{CheckInOutcome, FreezeOutcome, HabitStatus, StreakEngine};

/// A habit together with its evaluated status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitReport {
    pub habit: Habit,
    pub status: HabitStatus,
}

/// Habits and freeze bank, serialized as `{ habits, freeze }`.
///
/// Stored documents are read back with [`Tracker::deserialize`], which
/// tolerates damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tracker {
    habits: Vec<Habit>,
    freeze: FreezeBank,
    #[serde(skip)]
    engine: StreakEngine,
}

impl Tracker {
    /// Empty tracker with a full freeze bank for the week of `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self::from_parts(Vec::new(), FreezeBank::new(today))
    }

    pub fn from_parts(habits: Vec<Habit>, freeze: FreezeBank) -> Self {
        Self {
            habits,
            freeze,
            engine: StreakEngine::new(),
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn freeze(&self) -> &FreezeBank {
        &self.freeze
    }

    /// Replenish the freeze bank if `today` is in a new week.
    pub fn refresh(&mut self, today: NaiveDate) -> bool {
        self.freeze.refresh(today)
    }

    /// Freezes left for the week containing `today`.
    pub fn freezes_available(&mut self, today: NaiveDate) -> u8 {
        self.refresh(today);
        self.freeze.available()
    }

    /// Add a habit and return a reference to it.
    pub fn add_habit(&mut self, habit: Habit) -> &Habit {
        tracing::debug!(habit = habit.id(), name = habit.name(), "habit added");
        self.habits.push(habit);
        &self.habits[self.habits.len() - 1]
    }

    /// Remove the habit matching `query` and return it.
    ///
    /// # Errors
    ///
    /// Returns a [`HabitError`] if `query` matches no habit or several.
    pub fn remove_habit(&mut self, query: &str) -> Result<Habit, HabitError> {
        let index = self.position(query)?;
        let habit = self.habits.remove(index);
        tracing::debug!(habit = habit.id(), "habit removed");
        Ok(habit)
    }

    /// Find a habit by full id or unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`HabitError`] if `query` matches no habit or several.
    pub fn find(&self, query: &str) -> Result<&Habit, HabitError> {
        self.position(query).map(|index| &self.habits[index])
    }

    fn position(&self, query: &str) -> Result<usize, HabitError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(HabitError::NotFound(query.to_string()));
        }
        if let Some(index) = self.habits.iter().position(|h| h.id() == query) {
            return Ok(index);
        }

        let matches: Vec<usize> = self
            .habits
            .iter()
            .enumerate()
            .filter(|(_, h)| h.id().starts_with(query))
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [] => Err(HabitError::NotFound(query.to_string())),
            [index] => Ok(*index),
            _ => Err(HabitError::Ambiguous {
                query: query.to_string(),
                count: matches.len(),
            }),
        }
    }

    /// Evaluate one habit on `today`.
    ///
    /// # Errors
    ///
    /// Returns a [`HabitError`] if `query` matches no habit or several.
    pub fn status(&mut self, query: &str, today: NaiveDate) -> Result<HabitStatus, HabitError> {
        self.refresh(today);
        let habit = self.find(query)?;
        Ok(self.engine.evaluate(habit, today, &self.freeze))
    }

    /// Evaluate every habit on `today`, optionally ordered by streak
    /// (longest first, ties keep insertion order).
    pub fn reports(&mut self, today: NaiveDate, sort_by_streak: bool) -> Vec<HabitReport> {
        self.refresh(today);
        let mut reports: Vec<HabitReport> = self
            .habits
            .iter()
            .map(|habit| HabitReport {
                habit: habit.clone(),
                status: self.engine.evaluate(habit, today, &self.freeze),
            })
            .collect();

        if sort_by_streak {
            reports.sort_by(|a, b| b.habit.streak().cmp(&a.habit.streak()));
        }
        reports
    }

    /// Check in the habit matching `query` on `today`.
    ///
    /// # Errors
    ///
    /// Returns a [`HabitError`] if `query` matches no habit or several.
    pub fn check_in(&mut self, query: &str, today: NaiveDate) -> Result<CheckInOutcome, HabitError> {
        self.refresh(today);
        let index = self.position(query)?;
        Ok(self.engine.check_in(&mut self.habits[index], today, &self.freeze))
    }

    /// Spend a freeze on the habit matching `query` on `today`.
    ///
    /// # Errors
    ///
    /// Returns a [`HabitError`] if `query` matches no habit or several.
    pub fn apply_freeze(
        &mut self,
        query: &str,
        today: NaiveDate,
    ) -> Result<FreezeOutcome, HabitError> {
        let index = self.position(query)?;
        Ok(self
            .engine
            .apply_freeze(&mut self.habits[index], today, &mut self.freeze))
    }
}
