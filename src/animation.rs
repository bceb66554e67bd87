use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::canvas::Canvas;
use crate::color::{Palette, Rgb};
use crate::constants::HOLD_DURATION;
use crate::fade::fade;
use crate::state::LoopState;

/// How one fade-in / hold / fade-out cycle is paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub step: u8,
    pub hold: Duration,
}

impl Timing {
    pub fn new(step: u8) -> Self {
        Self { step, hold: HOLD_DURATION }
    }
}

/// Drives the disco animation until a quit is requested.
pub struct Animation {
    palette: Palette,
    timing: Timing,
    cursor: usize,
    state: LoopState,
    cycles: u64,
}

impl Animation {
    pub fn new(palette: Palette, timing: Timing) -> Self {
        Self {
            palette,
            timing,
            cursor: 0,
            state: LoopState::Animating,
            cycles: 0,
        }
    }

    /// Color shown by `surface` in the current cycle.
    pub fn phase_color(&self, surface: usize) -> Rgb {
        self.palette.color(self.palette.offset(self.cursor, surface))
    }

    /// Runs cycles until the canvas or `interrupted` asks to quit.
    /// Returns the number of completed cycles.
    ///
    /// Quit requests are only looked at between cycles, so a fade in
    /// progress always finishes.
    pub fn run<C: Canvas + ?Sized>(&mut self, canvas: &mut C, interrupted: &AtomicBool) -> u64 {
        while self.state == LoopState::Animating {
            // Window close, q, Ctrl+C in the window, or SIGINT
            if canvas.quit_requested() || interrupted.load(Ordering::SeqCst) {
                info!("Quit requested after {} cycles", self.cycles);
                self.state = LoopState::Quitting;
                continue;
            }
            self.cycle(canvas);
        }
        self.cycles
    }

    /// One full fade-in, hold, fade-out pass over every surface.
    pub fn cycle<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        let surfaces = canvas.surface_count();
        debug!(
            "Cycle {}: starting at {}",
            self.cycles,
            self.palette.swatch(self.cursor).name
        );

        // --- Fade in, each surface one palette entry ahead of the previous ---
        for surface in 0..surfaces {
            fade(canvas, surface, Rgb::BLACK, self.phase_color(surface), self.timing.step);
        }

        // --- Hold at full color ---
        if !self.timing.hold.is_zero() {
            thread::sleep(self.timing.hold);
        }

        // --- Fade back to black in the same order ---
        for surface in 0..surfaces {
            fade(canvas, surface, self.phase_color(surface), Rgb::BLACK, self.timing.step);
        }

        // Next cycle starts one color further
        self.cursor = self.palette.next(self.cursor);
        self.cycles += 1;
    }
}
