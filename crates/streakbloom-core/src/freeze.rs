//! Weekly-replenishing pool of streak freezes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::WeekKey;

/// Freezes granted at the start of every ISO week.
pub const FREEZE_CAPACITY: u8 = 3;

/// Freeze credits remaining for one ISO week.
///
/// `available` is only meaningful while `week_key` matches the current week.
/// Use [`FreezeBank::refresh`] before spending, or
/// [`FreezeBank::available_on`] for a read that accounts for staleness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredFreezeBank")]
pub struct FreezeBank {
    available: u8,
    week_key: WeekKey,
}

/// Wire shape before clamping.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredFreezeBank {
    available: i64,
    week_key: WeekKey,
}

impl From<StoredFreezeBank> for FreezeBank {
    fn from(stored: StoredFreezeBank) -> Self {
        FreezeBank::restore(stored.available, stored.week_key)
    }
}

impl FreezeBank {
    /// A full bank for the week containing `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            available: FREEZE_CAPACITY,
            week_key: WeekKey::of(today),
        }
    }

    /// Restore a bank from stored values, clamping the count into range.
    pub fn restore(available: i64, week_key: WeekKey) -> Self {
        let clamped = available.clamp(0, i64::from(FREEZE_CAPACITY));
        if clamped != available {
            tracing::warn!(available, clamped, "stored freeze count out of range");
        }
        Self {
            available: clamped as u8,
            week_key,
        }
    }

    pub fn available(&self) -> u8 {
        self.available
    }

    pub fn week_key(&self) -> WeekKey {
        self.week_key
    }

    /// Credits that would be available on `today` after a refresh.
    pub fn available_on(&self, today: NaiveDate) -> u8 {
        if self.week_key == WeekKey::of(today) {
            self.available
        } else {
            FREEZE_CAPACITY
        }
    }

    /// Replenish to full capacity if `today` falls in a different week.
    ///
    /// Returns `true` when the bank was reset. Idempotent within a week.
    pub fn refresh(&mut self, today: NaiveDate) -> bool {
        let current = WeekKey::of(today);
        if self.week_key == current {
            return false;
        }
        tracing::info!(
            from = %self.week_key,
            to = %current,
            "weekly freezes replenished"
        );
        self.week_key = current;
        self.available = FREEZE_CAPACITY;
        true
    }

    /// Consume one credit. Returns `false` without mutating when empty.
    pub fn spend(&mut self) -> bool {
        if self.available == 0 {
            return false;
        }
        self.available -= 1;
        true
    }
}
