use std::time::Duration;

pub const WINDOW_TITLE: &str = "discoteque";

pub const DISPLAY_ENV_VAR: &str = "DISPLAY";     // Presence selects windowed mode
pub const HEADLESS_WIDTH: i32 = 320;             // Fullscreen size without a display server
pub const HEADLESS_HEIGHT: i32 = 200;

pub const FALLBACK_REFRESH_RATE: u32 = 60;       // Used when the monitor reports 0 Hz
pub const FADE_SPAN: u32 = 255 * 2;              // Black -> color -> black in about one second
pub const HOLD_DURATION: Duration = Duration::from_millis(150); // Dwell at full color
