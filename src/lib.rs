//! `logsift`: normalize mixed structured and legacy test-runner logs.
//!
//! Test-runner output interleaves structured JSON log entries, legacy
//! free-text lines, and per-process prefixes. This library renders every
//! structured entry as a single readable line, pulls out source references
//! and process identities, and assigns each identity a stable color.
//!
//! # Example
//!
//! ```
//! use logsift::process_log;
//!
//! let log = concat!(
//!     r#"[js_test:auth] d20021| {"t":{"$date":"2024-01-01T00:00:00Z"},"s":"I","c":"NETWORK","id":23016,"ctx":"listener","msg":"Waiting for connections","attr":{"port":20021}}"#,
//!     "\n",
//!     "[js_test:auth] d20022| legacy text line",
//! );
//! let result = process_log(log);
//!
//! assert_eq!(result.lines.len(), 2);
//! assert!(result.lines[0].text.contains("I  NETWORK  [listener] Waiting for connections"));
//! assert_eq!(result.lines[0].port.as_deref(), Some("20021"));
//! assert_eq!(result.color_map.len(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod metadata;
pub mod palette;
pub mod pipeline;
pub mod render;
pub mod segment;

// Re-export primary API types for convenience.
pub use config::Config;
pub use entry::{FormattedEntry, StructuredEntry, log_to_str};
pub use error::{EntryError, LogsiftError};
pub use metadata::{GitVersion, LineMetadata, annotate_line};
pub use palette::{ColorMap, PALETTE};
pub use pipeline::{
    Diagnostic, DiagnosticKind, EventCorrelator, LineRecord, NoEvents, Pipeline, PipelineOptions,
    PipelineResult, RunMode, process_log,
};
pub use segment::{ENTRY_MARKER, LineKind, fuzzy_log_to_str, segment_line};
