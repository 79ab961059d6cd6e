//! Streak and freeze state machine for a single habit.
//!
//! The engine is pure decision logic. It never reads the clock: every call
//! receives `today` as a local calendar day. Freeze availability is always
//! read through the bank for that same day, so a bank left over from an
//! earlier week can never block or allow an action by mistake.
//!
//! | last check-in | gap | can check in | can freeze |
//! |---------------|-----|--------------|------------|
//! | none          | -   | yes          | no         |
//! | set           | 0   | no           | no         |
//! | set           | 1   | yes          | no         |
//! | set           | 2+  | if no freeze | if freeze  |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::day_gap;
use crate::freeze::FreezeBank;
use crate::habit::Habit;

/// Where a habit stands relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum StatusKind {
    /// Never checked in; the first check-in starts the streak at 1
    Fresh,
    /// Already checked in today
    DoneToday,
    /// Checked in yesterday; checking in today extends the streak
    OnPace,
    /// Days were missed and a freeze can cover them
    #[serde(rename_all = "camelCase")]
    Missed { missed_days: u32 },
    /// Days were missed and no freeze is left; the next check-in restarts
    #[serde(rename_all = "camelCase")]
    OutOfFreezes { missed_days: u32 },
}

/// Display tone for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Positive,
    Warning,
    Danger,
}

/// Read-only evaluation of a habit on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStatus {
    pub kind: StatusKind,
    pub tone: StatusTone,
    pub can_check_in: bool,
    pub can_freeze: bool,
    /// Days since the last check-in, `None` for a fresh habit.
    pub gap: Option<i64>,
}

/// Result of a check-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckInOutcome {
    /// First check-in; streak is now 1
    Started,
    /// Checked in the day after the last check-in; streak grew by one
    Incremented,
    /// Rejected: already checked in today
    AlreadyDone,
    /// Rejected: days were missed and a freeze should be spent first
    BlockedUseFreeze,
    /// Days were missed with no freeze left; streak restarted at 1
    Restarted,
}

impl CheckInOutcome {
    /// Whether the habit was changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Started | Self::Incremented | Self::Restarted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Incremented => "incremented",
            Self::AlreadyDone => "already-done",
            Self::BlockedUseFreeze => "blocked-use-freeze",
            Self::Restarted => "restarted",
        }
    }
}

impl fmt::Display for CheckInOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a freeze attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FreezeOutcome {
    /// One missed day covered and one credit spent
    Frozen,
    /// Rejected: the habit has never been checked in
    NotStarted,
    /// Rejected: no credits left this week
    NoFreezes,
    /// Rejected: there is no missed day to cover
    NotNeeded,
}

impl FreezeOutcome {
    /// Whether the habit and bank were changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Frozen)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frozen => "frozen",
            Self::NotStarted => "not-started",
            Self::NoFreezes => "no-freezes",
            Self::NotNeeded => "not-needed",
        }
    }
}

impl fmt::Display for FreezeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of the last check-in relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Standing {
    Fresh,
    /// Checked in today, or the stored date is after today
    Today,
    Yesterday,
    Lapsed { gap: i64 },
}

fn standing(habit: &Habit, today: NaiveDate) -> Standing {
    match habit.last_check_in() {
        None => Standing::Fresh,
        Some(last) => match day_gap(last, today) {
            gap if gap <= 0 => Standing::Today,
            1 => Standing::Yesterday,
            gap => Standing::Lapsed { gap },
        },
    }
}

fn missed_days(gap: i64) -> u32 {
    u32::try_from(gap - 1).unwrap_or(u32::MAX)
}

/// Stateless streak decision logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakEngine;

impl StreakEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate what the user may do with `habit` on `today`.
    pub fn evaluate(&self, habit: &Habit, today: NaiveDate, bank: &FreezeBank) -> HabitStatus {
        let gap = habit.last_check_in().map(|last| day_gap(last, today));

        let (kind, can_check_in, can_freeze) = match standing(habit, today) {
            Standing::Fresh => (StatusKind::Fresh, true, false),
            Standing::Today => (StatusKind::DoneToday, false, false),
            Standing::Yesterday => (StatusKind::OnPace, true, false),
            Standing::Lapsed { gap } => {
                let missed_days = missed_days(gap);
                if bank.available_on(today) > 0 {
                    (StatusKind::Missed { missed_days }, false, true)
                } else {
                    (StatusKind::OutOfFreezes { missed_days }, true, false)
                }
            }
        };

        let tone = match kind {
            StatusKind::Missed { .. } => StatusTone::Warning,
            StatusKind::OutOfFreezes { .. } => StatusTone::Danger,
            _ => StatusTone::Positive,
        };

        HabitStatus {
            kind,
            tone,
            can_check_in,
            can_freeze,
            gap,
        }
    }

    /// Check `habit` in on `today`.
    ///
    /// A lapsed streak is only restarted when no freeze is left this week;
    /// otherwise the check-in is refused so the caller can spend a freeze.
    pub fn check_in(&self, habit: &mut Habit, today: NaiveDate, bank: &FreezeBank) -> CheckInOutcome {
        let outcome = match standing(habit, today) {
            Standing::Fresh => {
                habit.record_check_in(today, 1);
                CheckInOutcome::Started
            }
            Standing::Today => CheckInOutcome::AlreadyDone,
            Standing::Yesterday => {
                let streak = habit.streak().saturating_add(1);
                habit.record_check_in(today, streak);
                CheckInOutcome::Incremented
            }
            Standing::Lapsed { .. } if bank.available_on(today) > 0 => {
                CheckInOutcome::BlockedUseFreeze
            }
            Standing::Lapsed { .. } => {
                habit.record_check_in(today, 1);
                CheckInOutcome::Restarted
            }
        };

        tracing::debug!(
            habit = habit.id(),
            outcome = %outcome,
            streak = habit.streak(),
            "check-in"
        );
        outcome
    }

    /// Spend one freeze to cover one missed day of `habit`.
    ///
    /// The bank is refreshed for `today` first. The recorded check-in moves
    /// forward by exactly one day and never reaches today, so a longer gap
    /// takes one freeze per missed day and today still needs a check-in.
    /// The streak value itself is left unchanged.
    pub fn apply_freeze(
        &self,
        habit: &mut Habit,
        today: NaiveDate,
        bank: &mut FreezeBank,
    ) -> FreezeOutcome {
        bank.refresh(today);

        let outcome = match habit.last_check_in() {
            None => FreezeOutcome::NotStarted,
            Some(_) if bank.available() == 0 => FreezeOutcome::NoFreezes,
            Some(last) if day_gap(last, today) < 2 => FreezeOutcome::NotNeeded,
            Some(last) => match (last.succ_opt(), today.pred_opt()) {
                (Some(boosted), Some(yesterday)) => {
                    habit.shift_last_check_in(boosted.min(yesterday));
                    bank.spend();
                    FreezeOutcome::Frozen
                }
                _ => FreezeOutcome::NotNeeded,
            },
        };

        tracing::debug!(
            habit = habit.id(),
            outcome = %outcome,
            available = bank.available(),
            "freeze"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekKey;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-05-13 is a Monday.
    fn mon() -> NaiveDate {
        day(2024, 5, 13)
    }

    fn habit_with(streak: u32, last: NaiveDate) -> Habit {
        let mut habit = Habit::new("Read", "📚").unwrap();
        habit.record_check_in(last, streak);
        habit
    }

    fn bank_with(available: i64, today: NaiveDate) -> FreezeBank {
        FreezeBank::restore(available, WeekKey::of(today))
    }

    #[test]
    fn test_evaluate_fresh() {
        let engine = StreakEngine::new();
        let habit = Habit::new("Read", "📚").unwrap();
        let status = engine.evaluate(&habit, mon(), &bank_with(3, mon()));
        assert_eq!(status.kind, StatusKind::Fresh);
        assert!(status.can_check_in);
        assert!(!status.can_freeze);
        assert_eq!(status.gap, None);
    }

    #[test]
    fn test_evaluate_done_today_and_on_pace() {
        let engine = StreakEngine::new();
        let habit = habit_with(2, mon());
        let bank = bank_with(3, mon());

        let today = engine.evaluate(&habit, mon(), &bank);
        assert_eq!(today.kind, StatusKind::DoneToday);
        assert!(!today.can_check_in && !today.can_freeze);

        let tomorrow = engine.evaluate(&habit, day(2024, 5, 14), &bank);
        assert_eq!(tomorrow.kind, StatusKind::OnPace);
        assert!(tomorrow.can_check_in && !tomorrow.can_freeze);
        assert_eq!(tomorrow.tone, StatusTone::Positive);
    }

    #[test]
    fn test_evaluate_lapsed_with_and_without_freezes() {
        let engine = StreakEngine::new();
        let habit = habit_with(3, mon());
        let thu = day(2024, 5, 16);

        let status = engine.evaluate(&habit, thu, &bank_with(1, thu));
        assert_eq!(status.kind, StatusKind::Missed { missed_days: 2 });
        assert!(!status.can_check_in);
        assert!(status.can_freeze);
        assert_eq!(status.tone, StatusTone::Warning);

        let status = engine.evaluate(&habit, thu, &bank_with(0, thu));
        assert_eq!(status.kind, StatusKind::OutOfFreezes { missed_days: 2 });
        assert!(status.can_check_in);
        assert!(!status.can_freeze);
        assert_eq!(status.tone, StatusTone::Danger);
        assert_eq!(status.gap, Some(3));
    }

    #[test]
    fn test_evaluate_uses_refreshed_count_for_stale_bank() {
        let engine = StreakEngine::new();
        let habit = habit_with(3, day(2024, 5, 17));
        let stale = bank_with(0, mon());
        let next_mon = day(2024, 5, 20);

        let status = engine.evaluate(&habit, next_mon, &stale);
        assert!(status.can_freeze);
    }

    #[test]
    fn test_check_in_starts_streak() {
        let engine = StreakEngine::new();
        let mut habit = Habit::new("Read", "📚").unwrap();
        let outcome = engine.check_in(&mut habit, mon(), &bank_with(3, mon()));
        assert_eq!(outcome, CheckInOutcome::Started);
        assert_eq!(habit.streak(), 1);
        assert_eq!(habit.last_check_in(), Some(mon()));
    }

    #[test]
    fn test_check_in_increments() {
        let engine = StreakEngine::new();
        let tue = day(2024, 5, 14);
        let mut habit = habit_with(5, mon());
        let outcome = engine.check_in(&mut habit, tue, &bank_with(3, tue));
        assert_eq!(outcome, CheckInOutcome::Incremented);
        assert_eq!(habit.streak(), 6);
        assert_eq!(habit.last_check_in(), Some(tue));
    }

    #[test]
    fn test_check_in_twice_same_day() {
        let engine = StreakEngine::new();
        let bank = bank_with(3, mon());
        let mut habit = Habit::new("Read", "📚").unwrap();
        engine.check_in(&mut habit, mon(), &bank);
        let before = habit.clone();
        assert_eq!(engine.check_in(&mut habit, mon(), &bank), CheckInOutcome::AlreadyDone);
        assert_eq!(habit, before);
    }

    #[test]
    fn test_check_in_blocked_when_freeze_available() {
        let engine = StreakEngine::new();
        let thu = day(2024, 5, 16);
        let mut habit = habit_with(3, mon());
        let before = habit.clone();
        let outcome = engine.check_in(&mut habit, thu, &bank_with(2, thu));
        assert_eq!(outcome, CheckInOutcome::BlockedUseFreeze);
        assert!(!outcome.is_applied());
        assert_eq!(habit, before);
    }

    #[test]
    fn test_check_in_restarts_without_freezes() {
        let engine = StreakEngine::new();
        let thu = day(2024, 5, 16);
        let mut habit = habit_with(3, mon());
        let outcome = engine.check_in(&mut habit, thu, &bank_with(0, thu));
        assert_eq!(outcome, CheckInOutcome::Restarted);
        assert_eq!(habit.streak(), 1);
        assert_eq!(habit.last_check_in(), Some(thu));
    }

    #[test]
    fn test_future_last_date_is_already_done_and_not_needed() {
        let engine = StreakEngine::new();
        let mut habit = habit_with(4, day(2024, 5, 15));
        let outcome = engine.check_in(&mut habit, mon(), &bank_with(3, mon()));
        assert_eq!(outcome, CheckInOutcome::AlreadyDone);
        assert_eq!(habit.streak(), 4);

        let mut bank = bank_with(3, mon());
        let outcome = engine.apply_freeze(&mut habit, mon(), &mut bank);
        assert_eq!(outcome, FreezeOutcome::NotNeeded);
        assert_eq!(habit.last_check_in(), Some(day(2024, 5, 15)));
        assert_eq!(bank.available(), 3);
    }

    #[test]
    fn test_check_in_streak_saturates() {
        let engine = StreakEngine::new();
        let tue = day(2024, 5, 14);
        let mut habit = habit_with(u32::MAX, mon());
        engine.check_in(&mut habit, tue, &bank_with(3, tue));
        assert_eq!(habit.streak(), u32::MAX);
    }

    #[test]
    fn test_apply_freeze_covers_one_day() {
        let engine = StreakEngine::new();
        let thu = day(2024, 5, 16);
        let mut habit = habit_with(3, mon());
        let mut bank = bank_with(2, thu);

        let outcome = engine.apply_freeze(&mut habit, thu, &mut bank);
        assert_eq!(outcome, FreezeOutcome::Frozen);
        assert_eq!(habit.last_check_in(), Some(day(2024, 5, 14)));
        assert_eq!(habit.streak(), 3);
        assert_eq!(bank.available(), 1);
    }

    #[test]
    fn test_apply_freeze_repeatedly_then_check_in() {
        let engine = StreakEngine::new();
        let thu = day(2024, 5, 16);
        let mut habit = habit_with(3, mon());
        let mut bank = bank_with(3, thu);

        assert_eq!(engine.apply_freeze(&mut habit, thu, &mut bank), FreezeOutcome::Frozen);
        assert_eq!(engine.apply_freeze(&mut habit, thu, &mut bank), FreezeOutcome::Frozen);
        assert_eq!(habit.last_check_in(), Some(day(2024, 5, 15)));
        assert_eq!(engine.apply_freeze(&mut habit, thu, &mut bank), FreezeOutcome::NotNeeded);
        assert_eq!(bank.available(), 1);

        assert_eq!(engine.check_in(&mut habit, thu, &bank), CheckInOutcome::Incremented);
        assert_eq!(habit.streak(), 4);
    }

    #[test]
    fn test_apply_freeze_rejections() {
        let engine = StreakEngine::new();
        let thu = day(2024, 5, 16);

        let mut fresh = Habit::new("Read", "📚").unwrap();
        let mut bank = bank_with(3, thu);
        assert_eq!(engine.apply_freeze(&mut fresh, thu, &mut bank), FreezeOutcome::NotStarted);

        let mut lapsed = habit_with(3, mon());
        let mut empty = bank_with(0, thu);
        assert_eq!(engine.apply_freeze(&mut lapsed, thu, &mut empty), FreezeOutcome::NoFreezes);
        assert_eq!(lapsed.last_check_in(), Some(mon()));

        let mut on_pace = habit_with(3, day(2024, 5, 15));
        assert_eq!(engine.apply_freeze(&mut on_pace, thu, &mut bank), FreezeOutcome::NotNeeded);
        assert_eq!(bank.available(), 3);
    }

    #[test]
    fn test_apply_freeze_refreshes_stale_bank() {
        let engine = StreakEngine::new();
        let next_wed = day(2024, 5, 22);
        let mut habit = habit_with(3, day(2024, 5, 19));
        let mut bank = bank_with(0, mon());

        let outcome = engine.apply_freeze(&mut habit, next_wed, &mut bank);
        assert_eq!(outcome, FreezeOutcome::Frozen);
        assert_eq!(bank.available(), 2);
        assert_eq!(bank.week_key(), WeekKey::of(next_wed));
    }

    #[test]
    fn test_outcome_wire_names() {
        assert_eq!(
            serde_json::to_string(&CheckInOutcome::BlockedUseFreeze).unwrap(),
            "\"blocked-use-freeze\""
        );
        assert_eq!(serde_json::to_string(&FreezeOutcome::NoFreezes).unwrap(), "\"no-freezes\"");
        assert_eq!(CheckInOutcome::AlreadyDone.to_string(), "already-done");
    }

    #[test]
    fn test_status_serializes_kind_tag() {
        let status = HabitStatus {
            kind: StatusKind::Missed { missed_days: 2 },
            tone: StatusTone::Warning,
            can_check_in: false,
            can_freeze: true,
            gap: Some(3),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["kind"]["state"], "missed");
        assert_eq!(json["kind"]["missedDays"], 2);
        assert_eq!(json["canFreeze"], true);
    }
}
