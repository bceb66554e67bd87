use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use log::info;

mod animation;
mod canvas;
mod color;
mod config;
mod constants;
mod display;
mod error;
mod fade;
mod state;

use crate::animation::{Animation, Timing};
use crate::color::{Palette, step_for_refresh_rate};
use crate::config::Config;
use crate::display::Session;

fn main() -> ExitCode {
    let config = Config::load();

    // RUST_LOG, when set, wins over the verbosity flags.
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let interrupted = interrupt_flag().context("Failed to install the Ctrl-C handler")?;

    let mut session = Session::open(config).context("Failed to open the display session")?;

    let step = step_for_refresh_rate(session.refresh_rate());
    info!("Fade step {} at {} Hz", step, session.refresh_rate());

    let mut animation = Animation::new(Palette::DISCO, Timing::new(step));
    let cycles = animation.run(&mut session, &interrupted);

    // Closes the window before reporting success.
    drop(session);
    info!("Stopped after {} cycles", cycles);
    Ok(())
}

/// Flag raised by SIGINT. The render loop checks it between cycles, so the
/// window is still closed cleanly.
fn interrupt_flag() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;
    Ok(interrupted)
}
