//! User-facing text for habits, statuses and outcomes.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use streakbloom_core::{
    day_gap, CheckInOutcome, FreezeOutcome, Habit, HabitReport, HabitStatus, StatusKind,
    StatusTone,
};

const FALLBACK_EMOJI: &str = "🌱";

/// Random glyph from the palette for a habit added without one.
pub fn pick_emoji(palette: &[String]) -> String {
    let usable: Vec<&String> = palette.iter().filter(|e| !e.trim().is_empty()).collect();
    usable
        .choose(&mut rand::thread_rng())
        .map(|e| e.trim().to_string())
        .unwrap_or_else(|| FALLBACK_EMOJI.to_string())
}

/// Emoji for display; older habits may have been stored without one.
pub fn display_emoji<'a>(habit: &'a Habit, palette: &'a [String]) -> &'a str {
    if !habit.emoji().is_empty() {
        return habit.emoji();
    }
    palette
        .iter()
        .map(|e| e.trim())
        .find(|e| !e.is_empty())
        .unwrap_or(FALLBACK_EMOJI)
}

pub fn short_id(habit: &Habit) -> &str {
    let id = habit.id();
    id.get(..8).unwrap_or(id)
}

pub fn status_text(status: &HabitStatus) -> String {
    match status.kind {
        StatusKind::Fresh => "Check in to spark this streak ✨".to_string(),
        StatusKind::DoneToday => "Already glowing today 💡".to_string(),
        StatusKind::OnPace => "You're on pace, keep blooming!".to_string(),
        StatusKind::Missed { missed_days } => format!(
            "Missed {missed_days} day{}. Use ❄️ freeze to keep the streak.",
            if missed_days > 1 { "s" } else { "" }
        ),
        StatusKind::OutOfFreezes { .. } => {
            "Out of freezes. Next check-in restarts this streak.".to_string()
        }
    }
}

pub fn check_in_hint(status: &HabitStatus) -> &'static str {
    match status.kind {
        StatusKind::Fresh => "Log today's effort",
        StatusKind::DoneToday => "Come back tomorrow",
        StatusKind::OnPace => "Keep the streak going",
        StatusKind::Missed { .. } => "Apply a freeze first",
        StatusKind::OutOfFreezes { .. } => "Logging now restarts the streak",
    }
}

pub fn freeze_hint(status: &HabitStatus) -> &'static str {
    match status.kind {
        StatusKind::Fresh => "Freeze unlocks after your first check-in",
        StatusKind::DoneToday => "No freeze needed",
        StatusKind::OnPace => "All good here",
        StatusKind::Missed { .. } => "Spend a freeze to shield the gap",
        StatusKind::OutOfFreezes { .. } => "Wait for next week's freezes",
    }
}

fn tone_marker(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Positive => "+",
        StatusTone::Warning => "!",
        StatusTone::Danger => "x",
    }
}

pub fn last_check_label(last: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(last) = last else {
        return "No check-ins yet".to_string();
    };
    match day_gap(last, today) {
        0 => "Last check-in: Today".to_string(),
        1 => "Last check-in: Yesterday".to_string(),
        _ => format!("Last check-in: {}", last.format("%b %-d")),
    }
}

pub fn check_in_message(outcome: CheckInOutcome, habit: &Habit) -> String {
    match outcome {
        CheckInOutcome::Started => format!("🔥 {} streak started!", habit.name()),
        CheckInOutcome::Incremented => format!("Streak up to {} 🔥", habit.streak()),
        CheckInOutcome::AlreadyDone => "Already checked in today".to_string(),
        CheckInOutcome::BlockedUseFreeze => {
            "Missed a day. Use ❄️ freeze to protect this streak.".to_string()
        }
        CheckInOutcome::Restarted => {
            format!("No freezes left. {} streak restarted.", habit.name())
        }
    }
}

pub fn freeze_message(outcome: FreezeOutcome, habit: &Habit) -> String {
    match outcome {
        FreezeOutcome::Frozen => format!("❄️ Freeze applied to {}!", habit.name()),
        FreezeOutcome::NotStarted => "Start the habit before freezing it.".to_string(),
        FreezeOutcome::NoFreezes => "No freezes available this week.".to_string(),
        FreezeOutcome::NotNeeded => {
            "You're on track. Freezes cover missed days only.".to_string()
        }
    }
}

/// Multi-line card for one habit.
pub fn habit_card(report: &HabitReport, today: NaiveDate, palette: &[String]) -> String {
    let habit = &report.habit;
    let status = &report.status;
    let check = if status.can_check_in { "yes" } else { "no" };
    let freeze = if status.can_freeze { "yes" } else { "no" };

    format!(
        "{emoji} {name} [{id}]  streak {streak}\n  {marker} {text}\n  {last}\n  check-in: {check} ({check_hint})  freeze: {freeze} ({freeze_hint})",
        emoji = display_emoji(habit, palette),
        name = habit.name(),
        id = short_id(habit),
        streak = habit.streak(),
        marker = tone_marker(status.tone),
        text = status_text(status),
        last = last_check_label(habit.last_check_in(), today),
        check_hint = check_in_hint(status),
        freeze_hint = freeze_hint(status),
    )
}
