//! Property tests for the streak engine and week keys.

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use streakbloom_core::{
    CheckInOutcome, FreezeBank, Habit, StreakEngine, Tracker, WeekKey, FREEZE_CAPACITY,
};

#[derive(Debug, Clone, Copy)]
enum Action {
    CheckIn,
    Freeze,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::CheckIn), Just(Action::Freeze)]
}

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 12, 20).unwrap()
}

/// ISO week by shifting to the Thursday of the Monday-started week and
/// counting weeks from the start of that Thursday's year.
fn thursday_week_key(date: NaiveDate) -> String {
    let weekday = i64::from(date.weekday().number_from_monday());
    let thursday = date + Duration::days(4 - weekday);
    let week = (thursday.ordinal0() / 7) + 1;
    format!("{:04}-W{:02}", thursday.year(), week)
}

proptest! {
    #[test]
    fn invariants_hold_after_any_sequence(
        steps in prop::collection::vec((0i64..5, action()), 1..60)
    ) {
        let mut today = base_day();
        let mut tracker = Tracker::new(today);
        let id = tracker.add_habit(Habit::new("Read", "📚").unwrap()).id().to_string();

        for (advance, action) in steps {
            today += Duration::days(advance);
            match action {
                Action::CheckIn => { tracker.check_in(&id, today).unwrap(); }
                Action::Freeze => { tracker.apply_freeze(&id, today).unwrap(); }
            }

            let habit = tracker.find(&id).unwrap();
            prop_assert_eq!(habit.streak() == 0, habit.last_check_in().is_none());
            if let Some(last) = habit.last_check_in() {
                prop_assert!(last <= today);
            }
            prop_assert!(tracker.freeze().available() <= FREEZE_CAPACITY);
        }
    }

    #[test]
    fn check_in_twice_same_day_is_rejected(
        streak_days in 1u32..20,
        gap in 0i64..6,
        freezes in 0i64..=3
    ) {
        let engine = StreakEngine::new();
        let start = base_day();
        let mut habit = Habit::new("Run", "🏃").unwrap();
        let warmup = FreezeBank::new(start);
        for offset in 0..streak_days {
            engine.check_in(&mut habit, start + Duration::days(i64::from(offset)), &warmup);
        }

        let today = start + Duration::days(i64::from(streak_days) - 1 + gap);
        let bank = FreezeBank::restore(freezes, WeekKey::of(today));
        let first = engine.check_in(&mut habit, today, &bank);
        if first.is_applied() {
            let snapshot = habit.clone();
            prop_assert_eq!(engine.check_in(&mut habit, today, &bank), CheckInOutcome::AlreadyDone);
            prop_assert_eq!(habit, snapshot);
        }
    }

    #[test]
    fn freeze_never_changes_streak_or_reaches_today(
        gap in 0i64..10,
        freezes in 0i64..=3
    ) {
        let engine = StreakEngine::new();
        let start = base_day();
        let mut habit = Habit::new("Rest", "🌙").unwrap();
        engine.check_in(&mut habit, start, &FreezeBank::new(start));

        let today = start + Duration::days(gap);
        let mut bank = FreezeBank::restore(freezes, WeekKey::of(today));
        let before = bank.available();
        let outcome = engine.apply_freeze(&mut habit, today, &mut bank);

        prop_assert_eq!(habit.streak(), 1);
        if outcome.is_applied() {
            prop_assert_eq!(bank.available(), before - 1);
            prop_assert!(habit.last_check_in().unwrap() < today);
        } else {
            prop_assert_eq!(bank.available(), before);
        }
    }

    #[test]
    fn week_key_matches_thursday_rule(offset in 0i64..20_000) {
        let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + Duration::days(offset);
        prop_assert_eq!(WeekKey::of(date).to_string(), thursday_week_key(date));
    }

    #[test]
    fn refresh_is_idempotent_within_a_week(offset in 0i64..3_000, spent in 0u8..=3) {
        let date = base_day() + Duration::days(offset);
        let mut bank = FreezeBank::new(date);
        for _ in 0..spent {
            bank.spend();
        }
        let before = bank.clone();
        let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        for d in 0..7 {
            prop_assert!(!bank.refresh(monday + Duration::days(d)));
        }
        prop_assert_eq!(bank, before);
    }
}
