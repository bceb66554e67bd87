use std::any::Any;
use std::panic;

use log::{LevelFilter, info, warn};
use raylib::core::window::{
    get_current_monitor, get_monitor_count, get_monitor_height, get_monitor_position,
    get_monitor_refresh_rate, get_monitor_width,
};
use raylib::prelude::*;

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::config::Config;
use crate::constants::*;
use crate::error::DisplayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Headless, // No display server: one small fullscreen surface
    Windowed, // One borderless surface per monitor
}

impl Mode {
    pub fn detect(config: &Config) -> Self {
        if config.display_env_present {
            Mode::Windowed
        } else {
            Mode::Headless
        }
    }
}

/// raylib's own log threshold. Its init chatter only shows at debug and up.
pub fn raylib_log_level(level: LevelFilter) -> TraceLogLevel {
    if level >= LevelFilter::Debug {
        TraceLogLevel::LOG_INFO
    } else {
        TraceLogLevel::LOG_ERROR
    }
}

/// `q`, or `c` with Ctrl held, asks to quit.
pub fn is_quit_key(key: KeyboardKey, ctrl: bool) -> bool {
    matches!(key, KeyboardKey::KEY_Q) || (ctrl && matches!(key, KeyboardKey::KEY_C))
}

/// Screen-space rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    fn union(self, other: Geometry) -> Geometry {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Geometry::new(x, y, right - x, bottom - y)
    }
}

/// How many surfaces there are and where they sit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub mode: Mode,
    pub surfaces: Vec<Geometry>,
}

impl Topology {
    pub fn headless() -> Self {
        Self {
            mode: Mode::Headless,
            surfaces: vec![Geometry::new(0, 0, HEADLESS_WIDTH, HEADLESS_HEIGHT)],
        }
    }

    /// One surface per monitor. With no monitor reported, falls back to a
    /// single surface covering `primary`.
    pub fn windowed(monitors: &[Geometry], primary: Geometry) -> Result<Self, DisplayError> {
        let surfaces = if monitors.is_empty() {
            warn!("No monitors reported, using the primary window size");
            vec![primary]
        } else {
            monitors.to_vec()
        };

        if let Some(bad) = surfaces.iter().find(|g| g.width <= 0 || g.height <= 0) {
            return Err(DisplayError::Surface(format!(
                "{}x{} at ({}, {})",
                bad.width, bad.height, bad.x, bad.y
            )));
        }

        Ok(Self { mode: Mode::Windowed, surfaces })
    }

    /// Smallest rectangle covering every surface.
    pub fn bounds(&self) -> Geometry {
        self.surfaces
            .iter()
            .copied()
            .reduce(Geometry::union)
            .unwrap_or(Geometry::new(0, 0, HEADLESS_WIDTH, HEADLESS_HEIGHT))
    }

    /// Surfaces in window coordinates, the window covering `bounds()`.
    pub fn panels(&self) -> Vec<Geometry> {
        let origin = self.bounds();
        self.surfaces
            .iter()
            .map(|g| Geometry::new(g.x - origin.x, g.y - origin.y, g.width, g.height))
            .collect()
    }
}

struct Panel {
    area: Geometry,
    color: Rgb,
}

/// The raylib window and the surfaces painted into it.
///
/// raylib drives a single window, so each display surface is a panel of one
/// borderless window spanning every monitor. Dropping the session closes
/// the window.
pub struct Session {
    rl: RaylibHandle,
    thread: RaylibThread,
    panels: Vec<Panel>,
    refresh_rate: u32,
    quit: bool,
}

impl Session {
    pub fn open(config: &Config) -> Result<Self, DisplayError> {
        let mode = Mode::detect(config);

        // --- Open the window ---
        let (mut rl, thread) = init_window(mode, raylib_log_level(config.log_level))?;
        // Only q, Ctrl+C or closing the window quit; ESC does nothing.
        rl.set_exit_key(None);

        // --- Lay out one surface per display ---
        let topology = match mode {
            Mode::Headless => Topology::headless(),
            Mode::Windowed => {
                let primary = Geometry::new(0, 0, rl.get_screen_width(), rl.get_screen_height());
                let topology = Topology::windowed(&monitor_geometries(), primary)?;

                // Stretch the single window over every monitor and keep it on top
                let bounds = topology.bounds();
                rl.set_window_size(bounds.width, bounds.height);
                rl.set_window_position(bounds.x, bounds.y);
                rl.set_window_state(rl.get_window_state().set_window_topmost(true));
                topology
            }
        };

        // --- Pace fades by the display we ended up on ---
        let refresh_rate = current_refresh_rate();
        info!(
            "{:?} mode, {} surface(s) {:?}, {} Hz",
            topology.mode,
            topology.surfaces.len(),
            topology.surfaces,
            refresh_rate
        );

        let panels = topology
            .panels()
            .into_iter()
            .map(|area| Panel { area, color: Rgb::BLACK })
            .collect();

        Ok(Self { rl, thread, panels, refresh_rate, quit: false })
    }

    pub fn refresh_rate(&self) -> u32 {
        self.refresh_rate
    }

    // Drains raylib's key queue and latches any quit request.
    fn poll_input(&mut self) {
        if self.rl.window_should_close() {
            self.quit = true;
        }
        let ctrl = self.rl.is_key_down(KeyboardKey::KEY_LEFT_CONTROL)
            || self.rl.is_key_down(KeyboardKey::KEY_RIGHT_CONTROL);
        while let Some(key) = self.rl.get_key_pressed() {
            if is_quit_key(key, ctrl) {
                self.quit = true;
            }
        }
    }
}

impl Canvas for Session {
    fn surface_count(&self) -> usize {
        self.panels.len()
    }

    fn present(&mut self, surface: usize, color: Rgb) {
        if let Some(panel) = self.panels.get_mut(surface) {
            panel.color = color;
        }

        // Redraw every panel so the ones not fading keep their color
        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(Color::BLACK);
        for panel in &self.panels {
            let Geometry { x, y, width, height } = panel.area;
            d.draw_rectangle(x, y, width, height, Color::from(panel.color));
        }
        drop(d);

        self.poll_input();
    }

    fn quit_requested(&mut self) -> bool {
        self.poll_input();
        self.quit
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        info!("Closing {} surface(s)", self.panels.len());
    }
}

// raylib panics when the window cannot be created; turn that into an error.
fn init_window(
    mode: Mode,
    trace_level: TraceLogLevel,
) -> Result<(RaylibHandle, RaylibThread), DisplayError> {
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));

    let result = panic::catch_unwind(|| {
        let mut builder = raylib::init();
        builder.title(WINDOW_TITLE).vsync().log_level(trace_level);
        match mode {
            Mode::Headless => builder.size(HEADLESS_WIDTH, HEADLESS_HEIGHT).fullscreen(),
            // 0x0 lets raylib size the window to the current monitor.
            Mode::Windowed => builder.size(0, 0).undecorated(),
        };
        builder.build()
    });

    panic::set_hook(previous_hook);
    result.map_err(|payload| DisplayError::Init(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "window creation failed".to_string()
    }
}

// Only meaningful once the window is open.
fn monitor_geometries() -> Vec<Geometry> {
    (0..get_monitor_count())
        .map(|monitor| {
            let position = get_monitor_position(monitor);
            Geometry::new(
                position.x as i32,
                position.y as i32,
                get_monitor_width(monitor),
                get_monitor_height(monitor),
            )
        })
        .collect()
}

fn current_refresh_rate() -> u32 {
    let rate = get_monitor_refresh_rate(get_current_monitor());
    if rate > 0 { rate as u32 } else { FALLBACK_REFRESH_RATE }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn config(display_env_present: bool) -> Config {
        Config { log_level: LevelFilter::Warn, display_env_present }
    }

    #[test]
    fn headless_has_one_small_surface() {
        assert_eq!(Mode::detect(&config(false)), Mode::Headless);
        let topology = Topology::headless();
        assert_eq!(topology.surfaces, vec![Geometry::new(0, 0, 320, 200)]);
        assert_eq!(topology.bounds(), Geometry::new(0, 0, 320, 200));
    }

    #[test]
    fn display_env_selects_windowed() {
        assert_eq!(Mode::detect(&config(true)), Mode::Windowed);
    }

    #[test]
    fn one_surface_per_monitor() {
        let monitors = [
            Geometry::new(0, 0, 1920, 1080),
            Geometry::new(1920, 0, 1280, 1024),
        ];
        let topology = Topology::windowed(&monitors, Geometry::new(0, 0, 1920, 1080)).unwrap();
        assert_eq!(topology.mode, Mode::Windowed);
        assert_eq!(topology.surfaces.len(), 2);
        assert_eq!(topology.bounds(), Geometry::new(0, 0, 3200, 1080));
        assert_eq!(topology.panels(), monitors.to_vec());
    }

    #[test]
    fn panels_are_relative_to_the_leftmost_monitor() {
        let monitors = [
            Geometry::new(0, 0, 1920, 1080),
            Geometry::new(-1280, 56, 1280, 1024),
        ];
        let topology = Topology::windowed(&monitors, Geometry::new(0, 0, 1920, 1080)).unwrap();
        assert_eq!(topology.bounds(), Geometry::new(-1280, 0, 3200, 1080));
        assert_eq!(
            topology.panels(),
            vec![Geometry::new(1280, 0, 1920, 1080), Geometry::new(0, 56, 1280, 1024)]
        );
    }

    #[test]
    fn no_monitors_falls_back_to_primary() {
        let primary = Geometry::new(0, 0, 1024, 768);
        let topology = Topology::windowed(&[], primary).unwrap();
        assert_eq!(topology.surfaces, vec![primary]);
    }

    #[test]
    fn zero_sized_monitor_is_an_error() {
        let monitors = [Geometry::new(0, 0, 0, 1080)];
        let err = Topology::windowed(&monitors, Geometry::new(0, 0, 1, 1)).unwrap_err();
        assert!(matches!(err, DisplayError::Surface(_)));
    }

    #[test]
    fn panic_payloads_become_messages() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("no GL context"));
        assert_eq!(panic_message(owned.as_ref()), "no GL context");
        let other: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(other.as_ref()), "window creation failed");
    }

    #[rstest]
    #[case(KeyboardKey::KEY_Q, false, true)]
    #[case(KeyboardKey::KEY_Q, true, true)]
    #[case(KeyboardKey::KEY_C, true, true)]
    #[case(KeyboardKey::KEY_C, false, false)]
    #[case(KeyboardKey::KEY_ESCAPE, false, false)]
    #[case(KeyboardKey::KEY_SPACE, true, false)]
    fn test_is_quit_key(#[case] key: KeyboardKey, #[case] ctrl: bool, #[case] expected: bool) {
        assert_eq!(is_quit_key(key, ctrl), expected);
    }

    #[rstest]
    #[case(LevelFilter::Off, TraceLogLevel::LOG_ERROR)]
    #[case(LevelFilter::Error, TraceLogLevel::LOG_ERROR)]
    #[case(LevelFilter::Warn, TraceLogLevel::LOG_ERROR)]
    #[case(LevelFilter::Info, TraceLogLevel::LOG_ERROR)]
    #[case(LevelFilter::Debug, TraceLogLevel::LOG_INFO)]
    #[case(LevelFilter::Trace, TraceLogLevel::LOG_INFO)]
    fn test_raylib_log_level(#[case] level: LevelFilter, #[case] expected: TraceLogLevel) {
        // TraceLogLevel has no PartialEq; compare the raw values.
        assert_eq!(raylib_log_level(level) as i32, expected as i32);
    }
}
