//! Per-line metadata: git version, source references, and process identity.
//!
//! Works on normalized lines (after structured entries have been rendered).
//! Three facts are pulled from each line:
//!
//! - the server's git version, announced once near the start of a log
//!   (`git version: <sha>`) and used for every later source link;
//! - a `{githash: "src/mongo/db/repl/oplog.cpp:123"}` source reference,
//!   which is cut out of the display text and turned into a URL;
//! - the port or replica-set role of the emitting process, used to color
//!   lines by origin.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Marker preceding the server's git version.
pub const GIT_VERSION_MARKER: &str = "git version: ";

/// Version used for source links before a git version has been seen.
pub const DEFAULT_GIT_VERSION: &str = "master";

/// Opening of a source-reference fragment.
pub const GITHASH_MARKER: &str = "{githash:";

/// Browsable repository prefix for source references.
pub const GIT_URL_PREFIX: &str = "https://github.com/mongodb/mongo/blob/";

/// Numbered process prefix: a space, a one-letter role code, up to five port
/// digits, then `|` (e.g. ` d20021|`). Capture 1 is the port.
pub const PORT_PATTERN: &str = r" [sdbc](\d{1,5})\|";

/// Replica-set role suffix of a fixture logger name, optionally qualified by
/// shard or config server (e.g. `:shard0:primary]`).
pub const ROLE_PATTERN: &str =
    r"(:shard\d*|:configsvr)?:(initsync|primary|mongos|secondary\d*|node\d*)]";

static PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PORT_PATTERN).expect("PORT_PATTERN is a valid regex"));

static ROLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ROLE_PATTERN).expect("ROLE_PATTERN is a valid regex"));

/// The git version source links resolve against.
///
/// Starts [`Unresolved`](Self::Unresolved) and locks on the first line that
/// announces a version; it never changes after that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GitVersion {
    #[default]
    Unresolved,
    Locked(String),
}

impl GitVersion {
    /// The version to put in URLs: the locked value or [`DEFAULT_GIT_VERSION`].
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unresolved => DEFAULT_GIT_VERSION,
            Self::Locked(version) => version,
        }
    }

    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }

    /// Lock the version if still unresolved and `line` announces one.
    ///
    /// The version is the rest of the line after [`GIT_VERSION_MARKER`],
    /// trimmed. An empty remainder does not lock. Returns `true` only on the
    /// call that locks.
    pub fn observe(&mut self, line: &str) -> bool {
        if self.is_locked() {
            return false;
        }
        let Some(pos) = line.find(GIT_VERSION_MARKER) else {
            return false;
        };
        let version = line[pos + GIT_VERSION_MARKER.len()..].trim();
        if version.is_empty() {
            return false;
        }
        debug!(version, "git version locked");
        *self = Self::Locked(version.to_string());
        true
    }
}

/// A source reference found in a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef<'a> {
    /// Repository-relative path, e.g. `src/mongo/db/repl/oplog.cpp:123`.
    pub path: &'a str,
    /// The line with the `{githash: ...}` fragment and one separator removed.
    pub text: String,
}

/// Find a `{githash: "path"}` fragment.
///
/// The path is the text between [`GITHASH_MARKER`] and the next `}`, trimmed
/// of whitespace and one pair of surrounding double quotes. Returns `None`
/// when there is no closing brace or the path is empty.
pub fn extract_git_ref(line: &str) -> Option<SourceRef<'_>> {
    let start = line.find(GITHASH_MARKER)?;
    let inner_start = start + GITHASH_MARKER.len();
    let close = inner_start + line[inner_start..].find('}')?;

    let raw = line[inner_start..close].trim();
    let path = raw
        .strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(raw)
        .trim();
    if path.is_empty() {
        return None;
    }

    let before = &line[..start];
    let after = &line[close + 1..];
    let text = match before.char_indices().next_back() {
        Some((idx, c)) if c.is_whitespace() => format!("{}{after}", &before[..idx]),
        Some(_) => format!("{before}{after}"),
        None => after
            .strip_prefix(|c: char| c.is_whitespace())
            .unwrap_or(after)
            .to_string(),
    };

    Some(SourceRef { path, text })
}

/// Build the browsable URL for a source path at a given version.
pub fn git_url(path: &str, version: &str) -> String {
    format!("{GIT_URL_PREFIX}{version}/{path}")
}

/// Extract the port or replica-set role token of the emitting process.
///
/// The numbered-port pattern wins over the role pattern.
pub fn extract_port(line: &str) -> Option<String> {
    if let Some(caps) = PORT_RE.captures(line) {
        return Some(caps[1].to_string());
    }
    ROLE_RE.find(line).map(|m| m.as_str().to_string())
}

/// Metadata for one normalized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMetadata {
    /// Display text, with any source-reference fragment removed.
    pub text: String,
    /// Fully qualified source URL.
    pub git_ref: Option<String>,
    /// Port or role token.
    pub port: Option<String>,
}

/// Run all extractors over one line, updating `version` first so a line that
/// both announces the version and carries a reference links to that version.
pub fn annotate_line(line: &str, version: &mut GitVersion) -> LineMetadata {
    version.observe(line);

    let (text, git_ref) = match extract_git_ref(line) {
        Some(source) => {
            let url = git_url(source.path, version.as_str());
            (source.text, Some(url))
        }
        None => (line.to_string(), None),
    };

    LineMetadata {
        text,
        git_ref,
        port: extract_port(line),
    }
}
