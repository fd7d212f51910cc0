//! Command-line arguments for the native menu shell.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::agency::rules::Mode;

/// Run a small AI consulting agency from the terminal.
#[derive(Parser, Debug)]
#[command(name = "ai-agency", version, about)]
pub struct Cli {
    /// Rule preset. Overrides the mode named in the config file.
    #[arg(long, value_enum, env = "AI_AGENCY_MODE")]
    pub mode: Option<Mode>,

    /// JSON file with rule overrides.
    #[arg(long, value_name = "FILE", env = "AI_AGENCY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
