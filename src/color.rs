use std::fmt;

use raylib::prelude::Color;

use crate::constants::{FADE_SPAN, FALLBACK_REFRESH_RATE};

/// A 24-bit color, one byte per channel. No alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::new(c.r, c.g, c.b, 255)
    }
}

/// Moves `a` toward `b` by at most `step`, never past it.
pub fn approach(a: u8, b: u8, step: u8) -> u8 {
    if a > b {
        a - step.min(a - b)
    } else {
        a + step.min(b - a)
    }
}

/// One fade frame: every channel of `from` approaches `to` independently.
///
/// The step is the same for all channels, so channels with a small delta
/// arrive early and the hue drifts during the fade.
pub fn fade_step(from: Rgb, to: Rgb, step: u8) -> Rgb {
    Rgb {
        r: approach(from.r, to.r, step),
        g: approach(from.g, to.g, step),
        b: approach(from.b, to.b, step),
    }
}

/// Per-frame step so that a full black -> color -> black cycle spans about
/// one second at `refresh_rate`. Never 0, otherwise a fade would not end.
pub fn step_for_refresh_rate(refresh_rate: u32) -> u8 {
    let rate = if refresh_rate == 0 { FALLBACK_REFRESH_RATE } else { refresh_rate };
    (FADE_SPAN / rate).clamp(1, u8::MAX as u32) as u8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub rgb: Rgb,
}

/// Fixed, ordered, circular list of colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    swatches: &'static [Swatch],
}

pub const RED: Swatch = Swatch { name: "red", rgb: Rgb::new(231, 0, 0) };
pub const YELLOW: Swatch = Swatch { name: "yellow", rgb: Rgb::new(231, 231, 0) };
pub const BLUE: Swatch = Swatch { name: "blue", rgb: Rgb::new(0, 0, 231) };
pub const GREEN: Swatch = Swatch { name: "green", rgb: Rgb::new(0, 231, 0) };
pub const PURPLE: Swatch = Swatch { name: "purple", rgb: Rgb::new(231, 0, 231) };

impl Palette {
    pub const DISCO: Palette = Palette { swatches: &[RED, YELLOW, BLUE, GREEN, PURPLE] };

    pub fn swatch(&self, index: usize) -> Swatch {
        self.swatches[index % self.swatches.len()]
    }

    pub fn color(&self, index: usize) -> Rgb {
        self.swatch(index).rgb
    }

    /// Index after `current`, wrapping to 0 past the last entry.
    pub fn next(&self, current: usize) -> usize {
        (current + 1) % self.swatches.len()
    }

    /// `current` advanced `n` times.
    pub fn offset(&self, current: usize, n: usize) -> usize {
        (current + n) % self.swatches.len()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DISCO
    }
}
