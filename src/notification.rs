use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// What the tick loop needs from whatever makes noise.
///
/// At most one sound plays at a time: every firing path checks
/// [`NotificationSink::is_busy`] first, and a busy sink means the firing is
/// skipped for that tick, not queued.
pub trait NotificationSink {
    /// playback still in progress
    fn is_busy(&self) -> bool;
    /// start playing `sound` from the beginning
    fn play(&mut self, sound: &Path) -> Result<(), PlaybackError>;
    /// short user-facing message, e.g. "Alarm" / "Alarm is going off!"
    fn notify(&mut self, title: &str, message: &str);
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("sound file {} doesn't exist", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("couldn't open sound file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't decode sound file {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}
