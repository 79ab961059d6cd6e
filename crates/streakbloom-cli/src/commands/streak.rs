//! Check-in, freeze and status commands for CLI.

use serde::Serialize;
use streakbloom_core::{Config, HabitReport};

use crate::render;
use crate::session::Session;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeOutput<'a, T> {
    outcome: T,
    applied: bool,
    habit: &'a streakbloom_core::Habit,
    freezes_available: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusOutput {
    today: String,
    week_key: String,
    freezes_available: u8,
    habits: Vec<HabitReport>,
}

pub fn check_in(
    id: &str,
    json: bool,
    config: Config,
    today: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(config, today)?;
    let mut tracker = session.load()?;

    let outcome = tracker.check_in(id, session.today)?;
    session.save(&tracker)?;

    let habit = tracker.find(id)?;
    if json {
        let output = OutcomeOutput {
            outcome,
            applied: outcome.is_applied(),
            habit,
            freezes_available: tracker.freeze().available(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render::check_in_message(outcome, habit));
    }
    Ok(())
}

pub fn freeze(
    id: &str,
    json: bool,
    config: Config,
    today: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(config, today)?;
    let mut tracker = session.load()?;

    let outcome = tracker.apply_freeze(id, session.today)?;
    session.save(&tracker)?;

    let habit = tracker.find(id)?;
    if json {
        let output = OutcomeOutput {
            outcome,
            applied: outcome.is_applied(),
            habit,
            freezes_available: tracker.freeze().available(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render::freeze_message(outcome, habit));
        println!("❄️ Freezes left this week: {}", tracker.freeze().available());
    }
    Ok(())
}

pub fn status(
    id: Option<&str>,
    json: bool,
    config: Config,
    today: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(config, today)?;
    let mut tracker = session.load()?;
    let today = session.today;

    let mut reports = tracker.reports(today, session.config.display.sort_by_streak);
    if let Some(id) = id {
        let wanted = tracker.find(id)?.id().to_string();
        reports.retain(|r| r.habit.id() == wanted);
    }
    // Persist a weekly replenishment even when nothing else changed.
    session.save(&tracker)?;

    let freezes_available = tracker.freeze().available();
    if json {
        let output = StatusOutput {
            today: streakbloom_core::format_day(today),
            week_key: tracker.freeze().week_key().to_string(),
            freezes_available,
            habits: reports,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("❄️ Freezes left this week: {freezes_available}");
    if reports.is_empty() {
        println!("Add your first habit to start a streak 🌱");
        return Ok(());
    }
    let palette = &session.config.display.emoji_palette;
    for report in &reports {
        println!();
        println!("{}", render::habit_card(report, today, palette));
    }
    Ok(())
}
