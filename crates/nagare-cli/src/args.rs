//! Command-line argument definitions for the Nagare CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, canvas size and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Nagare diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input Nagare file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON layout file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Canvas width, overriding the configuration file
    #[arg(long)]
    pub width: Option<f32>,

    /// Canvas height, overriding the configuration file
    #[arg(long)]
    pub height: Option<f32>,
}
