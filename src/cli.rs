//! Command-line argument definitions for `logsift`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Normalize mixed structured and legacy test-runner logs.
///
/// Reads a whole log from a file or stdin, renders embedded structured
/// entries as single lines, and colors each line by the process that
/// emitted it.
#[derive(Debug, Parser)]
#[command(name = "logsift", version, about, long_about = None)]
pub struct Cli {
    /// Log file to read. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Control color output.
    ///
    /// `auto` (the default) enables colors only when stdout is a TTY and
    /// `NO_COLOR` is unset. `FORCE_COLOR` enables them for piped output.
    #[arg(short = 'c', long, value_enum)]
    pub color: Option<ColorMode>,

    /// Print the full annotation result as JSON instead of text.
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Prefix every line with its line number.
    #[arg(short = 'n', long)]
    pub line_numbers: bool,

    /// Skip test-event correlation.
    #[arg(long)]
    pub production: bool,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log recovered problems (malformed entries, missing attributes) to stderr.
    ///
    /// `RUST_LOG` overrides the default `debug` filter.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// The input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input
            .as_ref()
            .filter(|path| path.as_os_str() != "-")
    }
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Enable colors only when stdout is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}
