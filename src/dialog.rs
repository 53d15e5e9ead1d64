use chrono::Timelike;
use eframe::egui::{Context, TextEdit, Window};
use thiserror::Error;

use crate::{
    alarm::{AlarmEntry, InvalidEntry},
    countdown::InvalidDuration,
    TimeOfDay,
};

/// what a dialog did this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState<T> {
    Editing,
    Done(T),
    Cancelled,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{0:?} isn't a number")]
    NotANumber(String),
    #[error(transparent)]
    Entry(#[from] InvalidEntry),
    #[error("minutes can't be greater than 59")]
    Minutes,
    #[error("seconds can't be greater than 59")]
    Seconds,
    #[error(transparent)]
    Duration(#[from] InvalidDuration),
}

/// empty fields count as zero
fn parse_field(text: &str) -> Result<u32, InputError> {
    let text = text.trim();
    if text.is_empty() {
        Ok(0)
    } else {
        text.parse()
            .map_err(|_| InputError::NotANumber(text.to_string()))
    }
}

pub(crate) fn parse_alarm_input(
    hour: &str,
    minute: &str,
    time_of_day: TimeOfDay,
) -> Result<AlarmEntry, InputError> {
    let hour = u8::try_from(parse_field(hour)?).map_err(|_| InvalidEntry::Hour)?;
    let minute = u8::try_from(parse_field(minute)?).map_err(|_| InvalidEntry::Minute)?;
    Ok(AlarmEntry::new(hour, minute, time_of_day)?)
}

pub(crate) fn parse_timer_input(
    hours: &str,
    minutes: &str,
    seconds: &str,
) -> Result<u32, InputError> {
    let hours = parse_field(hours)?;
    let minutes = parse_field(minutes)?;
    let seconds = parse_field(seconds)?;
    if minutes > 59 {
        return Err(InputError::Minutes);
    }
    if seconds > 59 {
        return Err(InputError::Seconds);
    }
    let total = u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds);
    let total = u32::try_from(total).unwrap_or(u32::MAX);
    if total == 0 {
        return Err(InputError::Duration(InvalidDuration));
    }
    Ok(total)
}

fn time_field(ui: &mut eframe::egui::Ui, text: &mut String) {
    ui.add(TextEdit::singleline(text).desired_width(24.0).char_limit(2));
}

/// set-alarm window, prefilled with the current wall-clock time
pub struct AlarmDialog {
    hour: String,
    minute: String,
    time_of_day: TimeOfDay,
    error: Option<InputError>,
}

impl Default for AlarmDialog {
    fn default() -> Self {
        let now = chrono::Local::now().time();
        let (pm, hour) = now.hour12();
        Self {
            hour: format!("{hour:02}"),
            minute: format!("{:02}", now.minute()),
            time_of_day: if pm { TimeOfDay::PM } else { TimeOfDay::AM },
            error: None,
        }
    }
}

impl AlarmDialog {
    pub fn show(&mut self, ctx: &Context) -> DialogState<AlarmEntry> {
        let mut state = DialogState::Editing;
        let mut open = true;
        Window::new("Set Alarm")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Input Hour and Minute");
                ui.horizontal(|ui| {
                    time_field(ui, &mut self.hour);
                    ui.label(":");
                    time_field(ui, &mut self.minute);
                    ui.selectable_value(&mut self.time_of_day, TimeOfDay::AM, "AM");
                    ui.selectable_value(&mut self.time_of_day, TimeOfDay::PM, "PM");
                });
                if let Some(error) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, error.to_string());
                }
                if ui.button("Submit").clicked() {
                    match parse_alarm_input(&self.hour, &self.minute, self.time_of_day) {
                        Ok(entry) => state = DialogState::Done(entry),
                        // the window stays open for correction
                        Err(error) => self.error = Some(error),
                    }
                }
            });
        if !open {
            state = DialogState::Cancelled;
        }
        state
    }
}

/// set-timer window: hours, minutes, seconds
#[derive(Default)]
pub struct TimerDialog {
    hours: String,
    minutes: String,
    seconds: String,
    error: Option<InputError>,
}

impl TimerDialog {
    pub fn show(&mut self, ctx: &Context) -> DialogState<u32> {
        let mut state = DialogState::Editing;
        let mut open = true;
        Window::new("Set Timer")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Input Hour, Minute, Second");
                ui.horizontal(|ui| {
                    time_field(ui, &mut self.hours);
                    ui.label(":");
                    time_field(ui, &mut self.minutes);
                    ui.label(":");
                    time_field(ui, &mut self.seconds);
                });
                if let Some(error) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, error.to_string());
                }
                if ui.button("Submit").clicked() {
                    match parse_timer_input(&self.hours, &self.minutes, &self.seconds) {
                        Ok(total_seconds) => state = DialogState::Done(total_seconds),
                        Err(error) => self.error = Some(error),
                    }
                }
            });
        if !open {
            state = DialogState::Cancelled;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alarm_input_parses_and_validates() {
        let entry = parse_alarm_input("9", "30", TimeOfDay::AM).unwrap();
        assert_eq!(entry, AlarmEntry::new(9, 30, TimeOfDay::AM).unwrap());

        assert_eq!(
            parse_alarm_input("13", "30", TimeOfDay::AM),
            Err(InputError::Entry(InvalidEntry::Hour))
        );
        assert_eq!(
            parse_alarm_input("9", "60", TimeOfDay::AM),
            Err(InputError::Entry(InvalidEntry::Minute))
        );
        assert_eq!(
            parse_alarm_input("nine", "30", TimeOfDay::AM),
            Err(InputError::NotANumber("nine".to_string()))
        );
        // empty hour counts as zero, which is out of the 1..=12 range
        assert_eq!(
            parse_alarm_input("", "30", TimeOfDay::AM),
            Err(InputError::Entry(InvalidEntry::Hour))
        );
    }

    #[test]
    fn oversized_hour_is_a_range_error_not_a_panic() {
        assert_eq!(
            parse_alarm_input("500", "30", TimeOfDay::AM),
            Err(InputError::Entry(InvalidEntry::Hour))
        );
    }

    #[test]
    fn timer_input_sums_to_seconds() {
        assert_eq!(parse_timer_input("1", "2", "3"), Ok(3723));
        assert_eq!(parse_timer_input("", "", "45"), Ok(45));
        assert_eq!(parse_timer_input("2", "", ""), Ok(7200));
    }

    #[test]
    fn timer_input_rejects_bad_fields() {
        assert_eq!(parse_timer_input("0", "60", "0"), Err(InputError::Minutes));
        assert_eq!(parse_timer_input("0", "0", "60"), Err(InputError::Seconds));
        assert_eq!(
            parse_timer_input("", "", ""),
            Err(InputError::Duration(InvalidDuration))
        );
        assert_eq!(
            parse_timer_input("x", "0", "0"),
            Err(InputError::NotANumber("x".to_string()))
        );
    }
}
