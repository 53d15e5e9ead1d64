use chrono::NaiveTime;

use crate::{
    alarm::{AlarmEntry, AlarmStore},
    countdown::Countdown,
    notification::{NotificationSink, PlaybackError},
};

/// What a single tick did, for the UI to surface.
#[derive(Debug)]
pub enum TickEvent {
    /// the countdown hit zero (reported even when the sink was busy)
    CountdownFinished,
    /// an alarm matched the wall clock and actually rang
    AlarmFired(AlarmEntry),
    /// a firing path couldn't play the configured sound
    PlaybackFailed(PlaybackError),
}

/// Drives both time-triggered components off one per-second callback.
pub struct Ticker {
    pub countdown: Countdown,
    pub alarms: AlarmStore,
}

impl Ticker {
    #[must_use]
    pub fn new(alarms: AlarmStore) -> Self {
        Self {
            countdown: Countdown::new(),
            alarms,
        }
    }

    /// One tick: the countdown is evaluated before the alarm list, and each
    /// firing path checks the sink's busy flag itself. Whichever fires first
    /// in a tick wins; the rest stay silent until the sound ends.
    pub fn tick(&mut self, now: NaiveTime, sink: &mut dyn NotificationSink) -> Vec<TickEvent> {
        let mut events = Vec::new();

        if self.countdown.tick() {
            events.push(TickEvent::CountdownFinished);
            if !sink.is_busy() {
                match sink.play(self.alarms.sound_path()) {
                    Ok(()) => sink.notify("Timer", "Timer is done!"),
                    Err(error) => events.push(TickEvent::PlaybackFailed(error)),
                }
            }
        }

        for alarm in self.alarms.due(now) {
            if sink.is_busy() {
                continue;
            }
            match sink.play(self.alarms.sound_path()) {
                Ok(()) => {
                    sink.notify("Alarm", "Alarm is going off!");
                    events.push(TickEvent::AlarmFired(*alarm));
                }
                Err(error) => events.push(TickEvent::PlaybackFailed(error)),
            }
        }

        events
    }
}
