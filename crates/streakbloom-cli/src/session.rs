//! Per-invocation context: today's date, configuration and the state store.

use chrono::NaiveDate;
use streakbloom_core::{
    parse_day, Clock, Config, FileStore, FixedClock, StateRepository, SystemClock, Tracker,
};

pub struct Session {
    pub config: Config,
    pub today: NaiveDate,
    repo: StateRepository<FileStore>,
}

impl Session {
    /// Resolve today (override or system clock) and open the default store.
    pub fn open(config: Config, today: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let clock: Box<dyn Clock> = match today {
            Some(raw) => Box::new(FixedClock(parse_day(raw)?)),
            None => Box::new(SystemClock),
        };
        let repo = StateRepository::with_key(FileStore::open_default()?, config.storage.key.clone());

        Ok(Self {
            today: clock.today(),
            config,
            repo,
        })
    }

    pub fn load(&self) -> Result<Tracker, Box<dyn std::error::Error>> {
        Ok(self.repo.load(self.today)?)
    }

    pub fn save(&mut self, tracker: &Tracker) -> Result<(), Box<dyn std::error::Error>> {
        self.repo.save(tracker)?;
        Ok(())
    }
}
