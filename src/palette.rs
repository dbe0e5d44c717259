//! Stable per-identity colors.
//!
//! Each distinct port/role token gets the next palette color in first-seen
//! order, wrapping after [`PALETTE`] is exhausted. The same input always
//! yields the same map.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Colors handed out to identities, in assignment order.
pub const PALETTE: [&str; 11] = [
    "#5aae61", "#9970ab", "#bf812d", "#2166ac", "#8c510a", "#1b7837", "#74add1", "#d6604d",
    "#762a83", "#35978f", "#de77ae",
];

/// Insertion-ordered mapping from identity token to palette color.
///
/// Entries are never changed once assigned. Serializes as a JSON object whose
/// keys appear in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    entries: Vec<(String, &'static str)>,
    index: HashMap<String, usize>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the color for `token`, assigning the next palette entry if the
    /// token is new. Returns `None` for an empty token.
    pub fn assign(&mut self, token: &str) -> Option<&'static str> {
        if token.is_empty() {
            return None;
        }
        if let Some(&i) = self.index.get(token) {
            return Some(self.entries[i].1);
        }
        let color = PALETTE[self.entries.len() % PALETTE.len()];
        self.index.insert(token.to_string(), self.entries.len());
        self.entries.push((token.to_string(), color));
        Some(color)
    }

    pub fn get(&self, token: &str) -> Option<&'static str> {
        self.index.get(token).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(token, color)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.entries.iter().map(|(token, color)| (token.as_str(), *color))
    }
}

impl Serialize for ColorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (token, color) in &self.entries {
            map.serialize_entry(token, color)?;
        }
        map.end()
    }
}

/// Split a `#rrggbb` color into its channels for terminal output.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
