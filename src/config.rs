use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    alarm::{AlarmEntry, InvalidEntry},
    ParseTimeOfDayError,
};

/// Everything that survives a restart: the alarm list and the ring sound.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub(crate) alarms: Vec<AlarmEntry>,
    pub(crate) sound: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alarms: vec![],
            sound: default_sound_path(),
        }
    }
}

/// On-disk shape, kept byte-compatible with the config files written by
/// earlier releases: each alarm is `[["hh", "mm"], "AM"]` with the hour and
/// minute as two-character zero-padded strings.
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(rename = "Alarms")]
    alarms: Vec<((String, String), String)>,
    #[serde(rename = "Sound")]
    sound: PathBuf,
}

impl From<&Config> for ConfigFile {
    fn from(config: &Config) -> Self {
        Self {
            alarms: config
                .alarms
                .iter()
                .map(|alarm| {
                    (
                        (
                            format!("{:02}", alarm.hour()),
                            format!("{:02}", alarm.minute()),
                        ),
                        alarm.time_of_day().to_string(),
                    )
                })
                .collect(),
            sound: config.sound.clone(),
        }
    }
}

impl TryFrom<ConfigFile> for Config {
    type Error = ConfigParseError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let alarms = file
            .alarms
            .into_iter()
            .map(
                |((hour, minute), time_of_day)| -> Result<AlarmEntry, ConfigParseError> {
                    Ok(AlarmEntry::new(
                        hour.parse()?,
                        minute.parse()?,
                        time_of_day.parse()?,
                    )?)
                },
            )
            .collect::<Result<_, _>>()?;
        Ok(Self {
            alarms,
            sound: file.sound,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigParseError {
    #[error("config isn't valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("alarm hour or minute isn't a number")]
    Digits(#[from] std::num::ParseIntError),
    #[error(transparent)]
    Entry(#[from] InvalidEntry),
    #[error(transparent)]
    Meridiem(#[from] ParseTimeOfDayError),
}

/// Whether [`ConfigStore::load`] found a usable file or had to fall back to
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// read an existing well-formed file
    Read,
    /// no file yet; defaults written
    Created,
    /// the file was there but unusable; defaults written over it
    Repaired,
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn default_path() -> PathBuf {
        let mut path = directories::ProjectDirs::from("", "", "chime_clock")
            .expect("couldn't get config path")
            .config_dir()
            .to_path_buf();
        path.push("config.json");
        path
    }

    /// Loads the config, falling back to (and writing) defaults when the
    /// file is missing or unparsable. The unparsable file is not kept.
    pub fn load(&self) -> (Config, LoadStatus) {
        let status = match fs::read_to_string(&self.path) {
            Ok(content) => match parse(&content) {
                Ok(config) => return (config, LoadStatus::Read),
                Err(error) => {
                    log::warn!("resetting config to defaults: {error}");
                    LoadStatus::Repaired
                }
            },
            Err(error) if error.kind() == io::ErrorKind::NotFound => LoadStatus::Created,
            Err(error) => {
                log::warn!("couldn't read config file: {error}");
                LoadStatus::Repaired
            }
        };
        let config = Config::default();
        if let Err(error) = self.save(&config) {
            log::warn!("couldn't write default config: {error}");
        }
        (config, status)
    }

    /// Overwrites the whole file. No merge, and no atomicity beyond what the
    /// platform gives a single write; a torn write is healed by the next
    /// [`ConfigStore::load`].
    pub fn save(&self, config: &Config) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&ConfigFile::from(config))?;
        fs::write(&self.path, content)
    }
}

fn parse(content: &str) -> Result<Config, ConfigParseError> {
    let file: ConfigFile = serde_json::from_str(content)?;
    Config::try_from(file)
}

fn default_sound_path() -> PathBuf {
    let mut path = directories::ProjectDirs::from("", "", "chime_clock")
        .expect("couldn't get data directory path")
        .data_dir()
        .to_path_buf();
    path.push("chime.wav");
    path
}
