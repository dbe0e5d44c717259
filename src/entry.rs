//! Structured log entry decoding and single-line rendering.
//!
//! A structured entry is a flat JSON object emitted by the server's
//! structured logger:
//!
//! ```text
//! {"t":{"$date":"2024-01-01T00:00:00Z"},"s":"I","c":"NETWORK","id":123,"ctx":"conn1","msg":"listening on {port}","attr":{"port":27017}}
//! ```
//!
//! It is rendered as
//! `<timestamp> <severity:2> <component:8> [<context>] <message>`, where the
//! message template has its `{name}` placeholders filled from `attr`.

use std::fmt::Write;

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::error::EntryError;

/// Template that means "the message lives in `attr.message`".
pub const EMPTY_TEMPLATE: &str = "{}";

/// Attribute key consulted when the template is [`EMPTY_TEMPLATE`].
const MESSAGE_ATTRIBUTE: &str = "message";

/// A decoded structured log record.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredEntry {
    #[serde(rename = "t")]
    pub time: EntryTime,
    #[serde(rename = "s")]
    pub severity: String,
    #[serde(rename = "c")]
    pub component: String,
    #[serde(rename = "ctx")]
    pub context: String,
    #[serde(default)]
    pub id: Option<Number>,
    #[serde(rename = "msg")]
    pub template: String,
    #[serde(default)]
    pub attr: Option<Map<String, Value>>,
}

/// The `t` object of an entry. `$date` is usually an ISO-8601 string, but
/// extended JSON forms such as `{"$numberLong": "..."}` also occur.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryTime {
    #[serde(rename = "$date")]
    pub date: Value,
}

/// The rendered form of a [`StructuredEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedEntry {
    /// The display line. May contain newlines if the message did.
    pub text: String,
    /// Placeholder names that had no matching attribute, in template order.
    pub missing_attributes: Vec<String>,
}

impl StructuredEntry {
    /// Decode a structured entry from its JSON text.
    ///
    /// Fails with [`EntryError::Malformed`] if the text is not JSON or any of
    /// `t.$date`, `s`, `c`, `ctx`, `msg` is missing or has the wrong type.
    pub fn parse(s: &str) -> Result<Self, EntryError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Render the entry to a single display line.
    pub fn render(&self) -> FormattedEntry {
        let mut missing_attributes = Vec::new();
        let message = self.render_message(&mut missing_attributes);

        let mut text = String::with_capacity(64 + message.len());
        let _ = write!(
            text,
            "{} {:<2} {:<8} [{}] {}",
            format_value(&self.time.date),
            self.severity,
            self.component,
            self.context,
            message
        );

        FormattedEntry {
            text,
            missing_attributes,
        }
    }

    fn attribute(&self, name: &str) -> Option<&Value> {
        self.attr.as_ref().and_then(|attr| attr.get(name))
    }

    fn render_message(&self, missing: &mut Vec<String>) -> String {
        if self.template == EMPTY_TEMPLATE {
            return self
                .attribute(MESSAGE_ATTRIBUTE)
                .map(format_value)
                .unwrap_or_default();
        }

        let pieces = tokenize(&self.template);
        let has_placeholders = pieces
            .iter()
            .any(|piece| matches!(piece, Piece::Placeholder(_)));

        if has_placeholders {
            let mut out = String::with_capacity(self.template.len());
            for piece in pieces {
                match piece {
                    Piece::Literal(text) => out.push_str(text),
                    Piece::Placeholder(name) => match self.attribute(name) {
                        Some(value) => out.push_str(&format_value(value)),
                        None => {
                            // Left verbatim so the gap stays visible.
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                            missing.push(name.to_string());
                        }
                    },
                }
            }
            return out;
        }

        match self.attr {
            Some(ref attr) if !attr.is_empty() => {
                let mut out = self.template.clone();
                out.push_str(&Value::Object(attr.clone()).to_string());
                out
            }
            _ => self.template.clone(),
        }
    }
}

/// Parse and render a structured entry, returning only the display text.
pub fn log_to_str(s: &str) -> Result<String, EntryError> {
    Ok(StructuredEntry::parse(s)?.render().text)
}

/// One span of a message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Literal(&'a str),
    /// The identifier inside `{...}`.
    Placeholder(&'a str),
}

/// Split a template into literal text and `{identifier}` placeholders.
///
/// Identifiers are non-empty runs of ASCII alphanumerics and `_`. Any other
/// brace (`{}`, `{ x }`, an unclosed `{`) stays literal.
fn tokenize(template: &str) -> Vec<Piece<'_>> {
    let bytes = template.as_bytes();
    let mut pieces = Vec::new();
    let mut literal_start = 0;
    let mut search_from = 0;

    while let Some(offset) = template[search_from..].find('{') {
        let open = search_from + offset;
        let name_start = open + 1;
        let name_len = bytes[name_start..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count();
        let close = name_start + name_len;

        if name_len > 0 && bytes.get(close) == Some(&b'}') {
            if literal_start < open {
                pieces.push(Piece::Literal(&template[literal_start..open]));
            }
            pieces.push(Piece::Placeholder(&template[name_start..close]));
            literal_start = close + 1;
            search_from = literal_start;
        } else {
            search_from = name_start;
        }
    }

    if literal_start < template.len() {
        pieces.push(Piece::Literal(&template[literal_start..]));
    }
    pieces
}

/// Format a JSON value for display.
///
/// - Strings: unquoted
/// - Everything else: compact JSON
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
