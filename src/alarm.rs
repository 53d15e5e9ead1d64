use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

use crate::{
    config::{Config, ConfigStore},
    TimeOfDay,
};

/// represents an alarm
/// contains the 12-hour wall-clock time the alarm should go off at.
/// only constructible through [`AlarmEntry::new`], so every entry in an
/// [`AlarmStore`] is already range checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmEntry {
    hour: u8,
    minute: u8,
    time_of_day: TimeOfDay,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidEntry {
    #[error("hours must be between 1 and 12")]
    Hour,
    #[error("minutes can't be greater than 59")]
    Minute,
}

impl AlarmEntry {
    pub fn new(hour: u8, minute: u8, time_of_day: TimeOfDay) -> Result<Self, InvalidEntry> {
        if !(1..=12).contains(&hour) {
            return Err(InvalidEntry::Hour);
        }
        if minute > 59 {
            return Err(InvalidEntry::Minute);
        }
        Ok(Self {
            hour,
            minute,
            time_of_day,
        })
    }

    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[must_use]
    pub const fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    /// seconds are not compared, so this stays true for the whole minute
    #[must_use]
    pub fn is_due(&self, now: NaiveTime) -> bool {
        let (pm, hour) = now.hour12();
        let time_of_day = if pm { TimeOfDay::PM } else { TimeOfDay::AM };
        u32::from(self.hour) == hour
            && u32::from(self.minute) == now.minute()
            && self.time_of_day == time_of_day
    }
}

impl fmt::Display for AlarmEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.time_of_day)
    }
}

#[derive(Debug, Error)]
pub enum RemoveAlarmError {
    #[error("no alarm set for {0}")]
    NotFound(AlarmEntry),
    #[error("couldn't save alarms")]
    Save(#[source] io::Error),
}

/// Owns the alarm list and writes it back to disk on every change.
pub struct AlarmStore {
    config: Config,
    store: ConfigStore,
}

impl AlarmStore {
    #[must_use]
    pub const fn new(config: Config, store: ConfigStore) -> Self {
        Self { config, store }
    }

    #[must_use]
    pub fn entries(&self) -> &[AlarmEntry] {
        &self.config.alarms
    }

    #[must_use]
    pub fn sound_path(&self) -> &Path {
        &self.config.sound
    }

    pub fn set_sound(&mut self, sound: PathBuf) -> io::Result<()> {
        self.config.sound = sound;
        self.store.save(&self.config)
    }

    /// appends the entry and persists; duplicates are allowed
    pub fn add(&mut self, entry: AlarmEntry) -> io::Result<()> {
        self.config.alarms.push(entry);
        self.store.save(&self.config)
    }

    /// removes the first entry equal to `entry` and persists the rest
    pub fn remove(&mut self, entry: &AlarmEntry) -> Result<(), RemoveAlarmError> {
        let index = self
            .config
            .alarms
            .iter()
            .position(|alarm| alarm == entry)
            .ok_or(RemoveAlarmError::NotFound(*entry))?;
        self.config.alarms.remove(index);
        self.store.save(&self.config).map_err(RemoveAlarmError::Save)
    }

    /// every entry matching `now` down to the minute
    pub fn due(&self, now: NaiveTime) -> impl Iterator<Item = &AlarmEntry> + '_ {
        self.config
            .alarms
            .iter()
            .filter(move |alarm| alarm.is_due(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).unwrap()
    }

    #[test]
    fn entry_rejects_out_of_range_input() {
        assert_eq!(
            AlarmEntry::new(0, 30, TimeOfDay::AM),
            Err(InvalidEntry::Hour)
        );
        assert_eq!(
            AlarmEntry::new(13, 30, TimeOfDay::AM),
            Err(InvalidEntry::Hour)
        );
        assert_eq!(
            AlarmEntry::new(9, 60, TimeOfDay::AM),
            Err(InvalidEntry::Minute)
        );
        assert!(AlarmEntry::new(12, 59, TimeOfDay::PM).is_ok());
    }

    #[test]
    fn due_matches_hour_minute_and_meridiem() {
        let entry = AlarmEntry::new(9, 30, TimeOfDay::AM).unwrap();
        assert!(entry.is_due(at(9, 30, 0)));
        // seconds are not part of the match
        assert!(entry.is_due(at(9, 30, 45)));
        assert!(!entry.is_due(at(9, 31, 0)));
        assert!(!entry.is_due(at(21, 30, 0)));
    }

    #[test]
    fn midnight_is_twelve_am() {
        let entry = AlarmEntry::new(12, 15, TimeOfDay::AM).unwrap();
        assert!(entry.is_due(at(0, 15, 0)));
        assert!(!entry.is_due(at(12, 15, 0)));
    }

    fn store_in(dir: &Path) -> AlarmStore {
        let config = Config {
            alarms: vec![],
            sound: dir.join("chime.wav"),
        };
        AlarmStore::new(config, ConfigStore::new(dir.join("config.json")))
    }

    #[test]
    fn add_then_remove_restores_and_persists_the_prior_list() {
        let dir = tempdir().unwrap();
        let mut alarms = store_in(dir.path());
        let entry = AlarmEntry::new(7, 45, TimeOfDay::PM).unwrap();

        alarms.add(entry).unwrap();
        assert_eq!(alarms.entries(), [entry]);
        alarms.remove(&entry).unwrap();
        assert!(alarms.entries().is_empty());

        let (reloaded, _) = ConfigStore::new(dir.path().join("config.json")).load();
        assert!(reloaded.alarms.is_empty());
    }

    #[test]
    fn remove_keeps_the_other_duplicate() {
        let dir = tempdir().unwrap();
        let mut alarms = store_in(dir.path());
        let entry = AlarmEntry::new(6, 0, TimeOfDay::AM).unwrap();

        alarms.add(entry).unwrap();
        alarms.add(entry).unwrap();
        alarms.remove(&entry).unwrap();
        assert_eq!(alarms.entries(), [entry]);
    }

    #[test]
    fn remove_missing_entry_reports_not_found() {
        let dir = tempdir().unwrap();
        let mut alarms = store_in(dir.path());
        let entry = AlarmEntry::new(6, 0, TimeOfDay::AM).unwrap();

        assert!(matches!(
            alarms.remove(&entry),
            Err(RemoveAlarmError::NotFound(missing)) if missing == entry
        ));
    }
}
