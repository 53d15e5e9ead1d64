use thiserror::Error;

/// Countdown timer state machine.
///
/// Idle until [`Countdown::start`]ed, then one decrement per tick until it
/// hits zero and goes idle again. Completion is reported exactly once per
/// run, on the tick that reaches zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining_seconds: u32,
    running: bool,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("timer duration must be greater than 0")]
pub struct InvalidDuration;

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects a zero duration and leaves the state untouched. Starting
    /// while already running restarts from the new duration.
    pub fn start(&mut self, total_seconds: u32) -> Result<(), InvalidDuration> {
        if total_seconds == 0 {
            return Err(InvalidDuration);
        }
        self.remaining_seconds = total_seconds;
        self.running = true;
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.remaining_seconds = 0;
        self.running = false;
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// One second passed. Returns true on the tick that finishes the
    /// countdown, and never again until the next start.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        // running implies remaining_seconds > 0
        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.running = false;
            true
        } else {
            false
        }
    }
}

/// `01:02:03` style rendering for the timer page
#[must_use]
pub fn format_hms(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_zero_and_finishes_once() {
        let mut countdown = Countdown::new();
        countdown.start(3).unwrap();

        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert!(countdown.tick());
        assert_eq!(countdown.remaining_seconds(), 0);
        assert!(!countdown.is_running());
        // idle ticks stay silent
        assert!(!countdown.tick());
    }

    #[test]
    fn zero_duration_is_rejected_and_state_unchanged() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.start(0), Err(InvalidDuration));
        assert!(!countdown.is_running());
        assert_eq!(countdown.remaining_seconds(), 0);
    }

    #[test]
    fn restart_replaces_the_remaining_time() {
        let mut countdown = Countdown::new();
        countdown.start(10).unwrap();
        countdown.tick();
        countdown.start(2).unwrap();
        assert_eq!(countdown.remaining_seconds(), 2);
    }

    #[test]
    fn cancel_goes_back_to_idle() {
        let mut countdown = Countdown::new();
        countdown.start(5).unwrap();
        countdown.cancel();
        assert!(!countdown.is_running());
        assert!(!countdown.tick());
    }

    #[test]
    fn hms_formatting() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(3723), "01:02:03");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(36_000), "10:00:00");
    }
}
