//! Command-line arguments for the keypad calculator.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "keypad", version, about = "Drive the keypad calculator engine from the terminal")]
pub struct Args {
    /// Log level or filter directive (overridden by RUST_LOG).
    #[arg(long = "log", value_name = "LEVEL")]
    pub log: Option<String>,

    /// Number of significant digits shown in previews and results.
    #[arg(long = "digits", value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub digits: Option<u16>,

    /// Script of key lines to run instead of the interactive prompt.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,
}
