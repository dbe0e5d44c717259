use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::process::ExitCode;

use clap::Parser;

use logsift::cli::{Cli, ColorMode};
use logsift::config::Config;
use logsift::error::LogsiftError;
use logsift::pipeline::Pipeline;
use logsift::render::{self, TextStyle};

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so upstream writers get a clean
    // SIGPIPE signal instead of a BrokenPipeError when logsift exits early.
    reset_sigpipe();

    let cli = Cli::parse();

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("logsift: {e}");
            return ExitCode::from(1);
        }
    };

    if config.verbose {
        init_logging();
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(LogsiftError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e @ LogsiftError::Io(_)) => {
            eprintln!("logsift: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("logsift: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<(), LogsiftError> {
    let raw = read_input(cli)?;
    let result = Pipeline::new(config.pipeline_options()).run(&raw);

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    if config.json_output {
        let json = render::render_json(&result).map_err(io::Error::other)?;
        writeln!(writer, "{json}")?;
    } else {
        let style = TextStyle::for_result(&result, config, resolve_color_mode(config.color_mode));
        let mut line_buf = String::new();
        for record in &result.lines {
            line_buf.clear();
            render::format_record(record, &result.color_map, style, &mut line_buf);
            writeln!(writer, "{line_buf}")?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Read the whole log. Invalid UTF-8 is replaced rather than rejected.
fn read_input(cli: &Cli) -> Result<String, LogsiftError> {
    let bytes = match cli.input_path() {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };
    Ok(match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Debug logging to stderr; `RUST_LOG` overrides the default filter.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("logsift=debug")),
        )
        .init();
}

fn resolve_color_mode(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                return false;
            }
            // FORCE_COLOR=0 counts as unset.
            if std::env::var("FORCE_COLOR").is_ok_and(|v| !v.is_empty() && v != "0") {
                return true;
            }
            if !io::stdout().is_terminal() {
                return false;
            }
            if std::env::var("TERM").is_ok_and(|v| v == "dumb") {
                return false;
            }
            true
        }
    }
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors.
/// For a CLI filter this causes the *upstream* writer to receive a
/// `BrokenPipeError` when `logsift` exits. Restoring `SIG_DFL` lets the OS
/// handle the signal normally.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
