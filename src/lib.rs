#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

use std::{fmt, str};

use eframe::egui::{
    self, CentralPanel, Context, Layout, RichText, ScrollArea, TopBottomPanel, Window,
};

use crate::{
    alarm::AlarmStore,
    config::{ConfigStore, LoadStatus},
    countdown::format_hms,
    dialog::{AlarmDialog, DialogState, TimerDialog},
    notification::PlaybackError,
    player::Player,
    tick::{TickEvent, Ticker},
};

pub mod alarm;
pub mod config;
pub mod countdown;
/// implementation of the set-alarm and set-timer dialogs for egui
pub mod dialog;
pub mod notification;
pub mod player;
pub mod tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeOfDay {
    #[default]
    AM,
    PM,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AM => "AM",
            Self::PM => "PM",
        })
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("time of day must be AM or PM, got {0:?}")]
pub struct ParseTimeOfDayError(String);

impl str::FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AM" => Ok(Self::AM),
            "PM" => Ok(Self::PM),
            _ => Err(ParseTimeOfDayError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Page {
    #[default]
    Clock,
    Timer,
    Alarm,
}

pub struct Clock {
    ticker: Ticker,
    player: Player,
    page: Page,
    adding_alarm: Option<AlarmDialog>,
    setting_timer: Option<TimerDialog>,
    ringing: Option<String>,
    playback_error: Option<PlaybackError>,
    last_tick: Option<i64>,
}

impl Clock {
    #[must_use]
    pub fn new(player: Player) -> Self {
        let store = ConfigStore::new(ConfigStore::default_path());
        let (config, status) = store.load();
        match status {
            LoadStatus::Read => {}
            LoadStatus::Created => log::info!("no config file yet, wrote defaults"),
            LoadStatus::Repaired => log::warn!("config file was unreadable, reset to defaults"),
        }
        Self {
            ticker: Ticker::new(AlarmStore::new(config, store)),
            player,
            page: Page::default(),
            adding_alarm: None,
            setting_timer: None,
            ringing: None,
            playback_error: None,
            last_tick: None,
        }
    }

    /// runs the domain tick once per wall-clock second
    fn run_tick(&mut self) {
        let now = chrono::Local::now();
        let stamp = now.timestamp();
        if self.last_tick == Some(stamp) {
            return;
        }
        self.last_tick = Some(stamp);
        for event in self.ticker.tick(now.time(), &mut self.player) {
            match event {
                TickEvent::CountdownFinished => self.ringing = Some("Timer is done!".to_string()),
                TickEvent::AlarmFired(alarm) => {
                    log::info!("alarm {alarm} went off");
                    self.ringing = Some(format!("{alarm} is going off!"));
                }
                TickEvent::PlaybackFailed(error) => {
                    log::warn!("{error}");
                    self.playback_error = Some(error);
                }
            }
        }
    }

    fn render_header(&mut self, ctx: &Context) {
        TopBottomPanel::top("pages_and_settings").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.page, Page::Clock, "Clock");
                ui.selectable_value(&mut self.page, Page::Timer, "Timer");
                ui.selectable_value(&mut self.page, Page::Alarm, "Alarm");
                ui.with_layout(Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("⚙").on_hover_text("choose alarm sound").clicked() {
                        self.pick_sound();
                    }
                });
            });
        });
    }

    fn pick_sound(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("sound", &["wav", "mp3", "ogg", "flac"])
            .pick_file()
        {
            if let Err(error) = self.ticker.alarms.set_sound(path) {
                log::warn!("couldn't save sound choice: {error}");
            }
        }
    }

    fn render_clock(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(
                RichText::new(chrono::Local::now().format("%I:%M:%S %p").to_string())
                    .monospace()
                    .size(40.0),
            );
        });
    }

    fn render_timer(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(
                RichText::new(format_hms(self.ticker.countdown.remaining_seconds()))
                    .monospace()
                    .size(40.0),
            );
        });
        ui.horizontal(|ui| {
            if ui.button("+").on_hover_text("set timer").clicked() {
                self.setting_timer = Some(TimerDialog::default());
            }
            if ui.button("Stop").on_hover_text("stop sound").clicked() {
                self.player.stop();
            }
        });
    }

    fn render_alarms(&mut self, ui: &mut egui::Ui) {
        let mut removed = None;
        ScrollArea::vertical().show(ui, |ui| {
            for alarm in self.ticker.alarms.entries() {
                ui.horizontal(|ui| {
                    ui.label(alarm.to_string());
                    if ui.button("x").on_hover_text("delete alarm").clicked() {
                        removed = Some(*alarm);
                    }
                });
            }
        });
        if let Some(alarm) = removed {
            if let Err(error) = self.ticker.alarms.remove(&alarm) {
                log::warn!("couldn't remove alarm: {error}");
            }
        }
        ui.horizontal(|ui| {
            if ui.button("+").on_hover_text("add alarm").clicked() {
                self.adding_alarm = Some(AlarmDialog::default());
            }
            if ui.button("Stop").on_hover_text("stop sound").clicked() {
                self.player.stop();
            }
        });
    }

    fn render_dialogs(&mut self, ctx: &Context) {
        if let Some(dialog) = &mut self.adding_alarm {
            match dialog.show(ctx) {
                DialogState::Done(entry) => {
                    self.adding_alarm = None;
                    if let Err(error) = self.ticker.alarms.add(entry) {
                        log::warn!("couldn't save new alarm: {error}");
                    }
                }
                DialogState::Cancelled => self.adding_alarm = None,
                DialogState::Editing => {}
            }
        }
        if let Some(dialog) = &mut self.setting_timer {
            match dialog.show(ctx) {
                DialogState::Done(total_seconds) => {
                    self.setting_timer = None;
                    if let Err(error) = self.ticker.countdown.start(total_seconds) {
                        log::warn!("{error}");
                    }
                }
                DialogState::Cancelled => self.setting_timer = None,
                DialogState::Editing => {}
            }
        }
    }

    fn render_ringing(&mut self, ctx: &Context) {
        let mut stop_clicked = false;
        if let Some(message) = &self.ringing {
            Window::new("Ringing").auto_sized().show(ctx, |ui| {
                ui.label(message);
                if ui.button("stop").clicked() {
                    stop_clicked = true;
                }
            });
        }
        if stop_clicked {
            self.player.stop();
            self.ringing = None;
        }

        let mut dismissed = false;
        if let Some(error) = &self.playback_error {
            Window::new("Problem playing sound")
                .auto_sized()
                .show(ctx, |ui| {
                    ui.label(error.to_string());
                    if ui.button("ok").clicked() {
                        dismissed = true;
                    }
                });
        }
        if dismissed {
            self.playback_error = None;
        }
    }
}

impl eframe::App for Clock {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // keep ticking even when there's no input
        ctx.request_repaint_after(std::time::Duration::from_millis(200));
        self.run_tick();

        self.render_header(ctx);
        self.render_dialogs(ctx);
        CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Clock => Self::render_clock(ui),
            Page::Timer => self.render_timer(ui),
            Page::Alarm => self.render_alarms(ui),
        });
        self.render_ringing(ctx);
    }
}
