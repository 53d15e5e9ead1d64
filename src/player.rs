use std::{fs::File, io::BufReader, path::Path};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, StreamError};

use crate::notification::{NotificationSink, PlaybackError};

/// rodio-backed notification sink
///
/// one output stream for the lifetime of the app and at most one playing
/// [`Sink`] at a time; a new `play` replaces whatever was there
pub struct Player {
    // dropping the stream silences everything, so it lives as long as the player
    stream: OutputStream,
    sink: Option<Sink>,
}

impl Player {
    pub fn new() -> Result<Self, StreamError> {
        Ok(Self {
            stream: OutputStreamBuilder::open_default_stream()?,
            sink: None,
        })
    }

    /// the stop buttons: cut whatever is playing
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

impl NotificationSink for Player {
    fn is_busy(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| !sink.empty())
    }

    fn play(&mut self, sound: &Path) -> Result<(), PlaybackError> {
        let file = File::open(sound).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                PlaybackError::FileNotFound {
                    path: sound.to_path_buf(),
                }
            } else {
                PlaybackError::Open {
                    path: sound.to_path_buf(),
                    source,
                }
            }
        })?;
        let source =
            Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
                path: sound.to_path_buf(),
                source,
            })?;
        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        self.sink = Some(sink);
        Ok(())
    }

    fn notify(&mut self, title: &str, message: &str) {
        log::info!("{title}: {message}");
    }
}
