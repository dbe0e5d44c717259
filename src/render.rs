//! Terminal and JSON output for a [`PipelineResult`].
//!
//! Text output is one line per [`LineRecord`]:
//!
//! ```text
//!    12  [js_test:auth] d20021| 2024-01-01T00:00:00Z I  NETWORK  [conn1] listening -> https://github.com/...
//! ```
//!
//! With color enabled, the line text takes its identity's palette color and
//! the source link is dimmed.

use std::fmt::Write;

use owo_colors::OwoColorize;

use crate::config::Config;
use crate::palette::{ColorMap, hex_to_rgb};
use crate::pipeline::{LineRecord, PipelineResult};

/// Separator between line text and its source link.
const GIT_REF_SEPARATOR: &str = " -> ";

/// Layout decisions shared by every line of one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub use_color: bool,
    /// Width of the line-number gutter, or `None` to omit it.
    pub gutter: Option<usize>,
}

impl TextStyle {
    pub fn for_result(result: &PipelineResult, config: &Config, use_color: bool) -> Self {
        let gutter = config.line_numbers.then(|| {
            let last = result.lines.len().saturating_sub(1);
            last.to_string().len()
        });
        Self { use_color, gutter }
    }
}

/// Format a single record into `out`.
pub fn format_record(record: &LineRecord, colors: &ColorMap, style: TextStyle, out: &mut String) {
    if let Some(width) = style.gutter {
        let number = format!("{:>width$}", record.line_number);
        if style.use_color {
            let _ = write!(out, "{}  ", number.truecolor(150, 150, 150));
        } else {
            out.push_str(&number);
            out.push_str("  ");
        }
    }

    let rgb = record
        .port
        .as_deref()
        .and_then(|port| colors.get(port))
        .and_then(hex_to_rgb);
    match rgb {
        Some((r, g, b)) if style.use_color => {
            let _ = write!(out, "{}", record.text.truecolor(r, g, b));
        }
        _ => out.push_str(&record.text),
    }

    if let Some(ref git_ref) = record.git_ref {
        out.push_str(GIT_REF_SEPARATOR);
        if style.use_color {
            let _ = write!(out, "{}", git_ref.dimmed());
        } else {
            out.push_str(git_ref);
        }
    }
}

/// Serialize the whole result as JSON.
pub fn render_json(result: &PipelineResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(result)
}
