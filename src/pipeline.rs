//! The annotation pipeline: raw log text in, annotated line records out.
//!
//! A run is a single synchronous pass:
//!
//! 1. split the input into lines and render any structured entries;
//! 2. re-split the rendered text, since messages may contain newlines;
//! 3. annotate each resulting line in order, threading the git version and
//!    color map through the pass;
//! 4. hand the finished records to an [`EventCorrelator`] unless running in
//!    [`RunMode::Production`].
//!
//! Every run starts from a fresh [`AnnotationState`], so one [`Pipeline`] can
//! be shared between threads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::metadata::{self, GitVersion};
use crate::palette::ColorMap;
use crate::segment;

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    /// 0-based index in the normalized line sequence.
    pub line_number: usize,
    /// Display text with any source-reference fragment removed.
    pub text: String,
    /// Port or replica-set role token of the emitting process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// Browsable URL for the line's source reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
}

/// A recovered per-line problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// First output line produced from the offending input line.
    pub line_number: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// A structured-entry marker was found but the entry did not decode.
    /// The line was emitted unmodified.
    MalformedEntry { reason: String },
    /// A message placeholder had no matching attribute. The placeholder was
    /// left in the text verbatim.
    MissingAttribute { name: String },
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub lines: Vec<LineRecord>,
    pub color_map: ColorMap,
    pub is_done: bool,
    /// Opaque event descriptors from the correlator.
    pub events: Vec<Value>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Whether the correlator runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Development,
    /// Skip event correlation entirely.
    Production,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub mode: RunMode,
}

/// Derives higher-level events from the finished line sequence.
pub trait EventCorrelator {
    fn correlate(&self, lines: &[LineRecord]) -> Vec<Value>;
}

impl<F> EventCorrelator for F
where
    F: Fn(&[LineRecord]) -> Vec<Value>,
{
    fn correlate(&self, lines: &[LineRecord]) -> Vec<Value> {
        self(lines)
    }
}

/// Correlator that never reports events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvents;

impl EventCorrelator for NoEvents {
    fn correlate(&self, _lines: &[LineRecord]) -> Vec<Value> {
        Vec::new()
    }
}

/// State threaded through one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationState {
    pub git_version: GitVersion,
    pub colors: ColorMap,
}

pub struct Pipeline {
    options: PipelineOptions,
    correlator: Box<dyn EventCorrelator + Send + Sync>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            correlator: Box::new(NoEvents),
        }
    }

    /// Replace the event correlator.
    #[must_use]
    pub fn with_correlator<C>(mut self, correlator: C) -> Self
    where
        C: EventCorrelator + Send + Sync + 'static,
    {
        self.correlator = Box::new(correlator);
        self
    }

    /// Annotate a complete log.
    ///
    /// Never fails: malformed entries are passed through and reported in
    /// [`PipelineResult::diagnostics`].
    pub fn run(&self, raw: &str) -> PipelineResult {
        let mut state = AnnotationState::default();
        let mut lines: Vec<LineRecord> = Vec::new();
        let mut diagnostics = Vec::new();

        for raw_line in raw.lines() {
            let first_line_number = lines.len();

            let normalized = match segment::segment_line(raw_line) {
                Ok(kind) => {
                    if let Some(entry) = kind.entry() {
                        for name in &entry.missing_attributes {
                            debug!(line = first_line_number, attribute = %name, "placeholder has no attribute");
                            diagnostics.push(Diagnostic {
                                line_number: first_line_number,
                                kind: DiagnosticKind::MissingAttribute { name: name.clone() },
                            });
                        }
                    }
                    kind.into_text(raw_line)
                }
                Err(err) => {
                    debug!(line = first_line_number, error = %err, "passing malformed entry through");
                    diagnostics.push(Diagnostic {
                        line_number: first_line_number,
                        kind: DiagnosticKind::MalformedEntry {
                            reason: err.to_string(),
                        },
                    });
                    raw_line.into()
                }
            };

            for line in normalized.split('\n') {
                let line = line.strip_suffix('\r').unwrap_or(line);
                let meta = metadata::annotate_line(line, &mut state.git_version);
                if let Some(ref port) = meta.port {
                    state.colors.assign(port);
                }
                lines.push(LineRecord {
                    line_number: lines.len(),
                    text: meta.text,
                    port: meta.port,
                    git_ref: meta.git_ref,
                });
            }
        }

        let events = match self.options.mode {
            RunMode::Production => Vec::new(),
            RunMode::Development => self.correlator.correlate(&lines),
        };

        trace!(
            lines = lines.len(),
            identities = state.colors.len(),
            diagnostics = diagnostics.len(),
            git_version = state.git_version.as_str(),
            "annotation pass complete"
        );

        PipelineResult {
            lines,
            color_map: state.colors,
            is_done: true,
            events,
            diagnostics,
        }
    }
}

/// Annotate a log with the default pipeline.
pub fn process_log(raw: &str) -> PipelineResult {
    Pipeline::default().run(raw)
}
