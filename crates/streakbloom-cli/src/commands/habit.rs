//! Habit management commands for CLI.

use std::io::{BufRead, Write};

use clap::Subcommand;
use streakbloom_core::{Config, Habit};

use crate::render;
use crate::session::Session;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// Emoji marker (random from the palette if omitted)
        #[arg(long)]
        emoji: Option<String>,
    },
    /// List habits
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a habit
    Remove {
        /// Habit ID or unique ID prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

fn confirm(prompt: &str) -> Result<bool, Box<dyn std::error::Error>> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

pub fn run(
    action: HabitAction,
    config: Config,
    today: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(config, today)?;
    let mut tracker = session.load()?;

    match action {
        HabitAction::Add { name, emoji } => {
            let emoji = emoji
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| render::pick_emoji(&session.config.display.emoji_palette));
            let habit = Habit::new(&name, &emoji)?;
            let added = tracker.add_habit(habit).clone();
            session.save(&tracker)?;
            println!("{} {} added!", added.emoji(), added.name());
            println!("id: {}", added.id());
        }
        HabitAction::List { json } => {
            let reports = tracker.reports(session.today, session.config.display.sort_by_streak);
            if json {
                let habits: Vec<&Habit> = reports.iter().map(|r| &r.habit).collect();
                println!("{}", serde_json::to_string_pretty(&habits)?);
            } else if reports.is_empty() {
                println!("Add your first habit to start a streak 🌱");
            } else {
                let palette = &session.config.display.emoji_palette;
                for report in &reports {
                    let habit = &report.habit;
                    println!(
                        "{}  {} {}  (streak {})",
                        render::short_id(habit),
                        render::display_emoji(habit, palette),
                        habit.name(),
                        habit.streak()
                    );
                }
            }
        }
        HabitAction::Remove { id, yes } => {
            let habit = tracker.find(&id)?;
            let prompt = format!("Delete {} {}?", habit.emoji(), habit.name());
            if !yes && !confirm(&prompt)? {
                println!("Kept {}", habit.name());
                return Ok(());
            }
            let removed = tracker.remove_habit(&id)?;
            session.save(&tracker)?;
            println!("{} removed", removed.name());
        }
    }
    Ok(())
}
