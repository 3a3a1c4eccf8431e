//! Language packs.
//!
//! A [`Lexicon`] is a flat key/value map loaded per language pack, the same
//! shape the host keeps its language files in.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: HashMap<String, String>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Looks up a key; a missing entry yields the key itself so gaps in a
    /// translation stay visible instead of rendering blank.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Overlays `other` on top of this lexicon.
    pub fn merge(mut self, other: Lexicon) -> Self {
        self.entries.extend(other.entries);
        self
    }
}
