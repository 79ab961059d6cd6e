//! # Streak Bloom Core Library
//!
//! Daily habit streaks with a weekly allowance of freezes that forgive a
//! missed day. The library holds every decision; the CLI is a thin layer
//! that reads the clock, loads state, calls in here and prints the result.
//!
//! ## Architecture
//!
//! - **Streak Engine**: pure decisions over one habit's streak and last
//!   check-in date, given today's date and the freeze bank
//! - **Freeze Bank**: three freezes per ISO week, replenished (not
//!   accumulated) when the week changes
//! - **Tracker**: the whole state, with entry points that refresh the bank
//!   for the given day before every decision
//! - **Storage**: a JSON document behind a key-value store, plus TOML
//!   configuration
//!
//! ## Key Components
//!
//! - [`StreakEngine`]: check-in / freeze state machine
//! - [`FreezeBank`]: weekly freeze credits
//! - [`Tracker`]: habits plus bank, serializable as one document
//! - [`StateRepository`]: load/save through a [`KeyValueStore`]
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod clock;
pub mod error;
pub mod freeze;
pub mod habit;
pub mod storage;
pub mod streak;
pub mod tracker;

pub use calendar::{day_gap, format_day, iso_week_key, parse_day, WeekKey};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, HabitError, Result, StorageError, ValidationError};
pub use freeze::{FreezeBank, FREEZE_CAPACITY};
pub use habit::Habit;
pub use storage::{
    data_dir, Config, FileStore, KeyValueStore, MemoryStore, StateRepository, DEFAULT_STORAGE_KEY,
};
pub use streak::{CheckInOutcome, FreezeOutcome, HabitStatus, StatusKind, StatusTone, StreakEngine};
pub use tracker::{HabitReport, Tracker};
