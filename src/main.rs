use std::error::Error;

use chime_clock::{player::Player, Clock};
use eframe::{egui::ViewportBuilder, run_native};

fn main() -> Result<(), Box<dyn Error>> {
    // initilize the logger
    simple_file_logger::init_logger!("chime_clock").expect("couldn't initialize logger");

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([480.0, 260.0])
            .with_min_inner_size([400.0, 200.0])
            .with_max_inner_size([600.0, 300.0]),
        ..Default::default()
    };

    let player = Player::new()?;
    let app = Clock::new(player);
    run_native("Chime Clock", native_options, Box::new(|_| Ok(Box::new(app))))
        .map_err(|e| e.into())
}
