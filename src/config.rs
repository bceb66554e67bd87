use std::env;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::constants::DISPLAY_ENV_VAR;

/// Fades every display through a disco palette.
/// Quit with q, Ctrl+C or by closing the window.
#[derive(Parser, Debug)]
#[command(name = "discoteque", version, about)]
pub struct Args {
    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub log_level: LevelFilter,
    /// A display server is advertised; otherwise a single small fullscreen
    /// surface is used.
    pub display_env_present: bool,
}

impl Config {
    /// Reads the command line and the environment. Called once at startup.
    pub fn load() -> Self {
        let args = Args::parse();
        Self::from_args(&args, env::var_os(DISPLAY_ENV_VAR).is_some())
    }

    pub fn from_args(args: &Args, display_env_present: bool) -> Self {
        let log_level = if args.quiet {
            LevelFilter::Error
        } else {
            match args.verbose {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Info,
                2 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            }
        };
        Self { log_level, display_env_present }
    }
}
