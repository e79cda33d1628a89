//! Metadata records attached to catalog nodes.
//!
//! A record is a flat string-keyed property bag with a dirty flag. Two
//! schemas exist (game and folder) that differ only in which keys are
//! pre-populated with defaults; get/set themselves are schema-agnostic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which set of default keys a record starts out with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataSchema {
    Game,
    Folder,
}

/// Default key/value pairs for game entries.
const GAME_DEFAULTS: &[(&str, &str)] = &[
    ("name", ""),
    ("sortname", ""),
    ("desc", ""),
    ("image", ""),
    ("thumbnail", ""),
    ("marquee", ""),
    ("video", ""),
    ("rating", "0"),
    ("releasedate", ""),
    ("developer", ""),
    ("publisher", ""),
    ("genre", ""),
    ("players", "1"),
    ("favorite", "false"),
    ("hidden", "false"),
    ("kidgame", "false"),
    ("playcount", "0"),
    ("lastplayed", ""),
];

/// Default key/value pairs for folder entries.
const FOLDER_DEFAULTS: &[(&str, &str)] = &[
    ("name", ""),
    ("sortname", ""),
    ("desc", ""),
    ("image", ""),
    ("thumbnail", ""),
    ("hidden", "false"),
];

impl MetadataSchema {
    /// The expected keys and their default values, in declaration order.
    pub fn defaults(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Game => GAME_DEFAULTS,
            Self::Folder => FOLDER_DEFAULTS,
        }
    }

    /// Default value for a single key ("" for keys outside the schema).
    pub fn default_value(self, key: &str) -> &'static str {
        self.defaults()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or("")
    }
}

/// A string key/value property bag with a dirty flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataRecord {
    schema: MetadataSchema,
    values: HashMap<String, String>,
    changed: bool,
}

impl MetadataRecord {
    /// Create a record pre-populated with the schema's defaults.
    pub fn new(schema: MetadataSchema) -> Self {
        let values = schema
            .defaults()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            schema,
            values,
            changed: false,
        }
    }

    pub fn schema(&self) -> MetadataSchema {
        self.schema
    }

    /// Value for a key, or "" if absent.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Set a value and mark the record dirty.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
        self.changed = true;
    }

    /// Leading-integer parse of a value (atoi semantics): `"12abc"` is 12,
    /// `"1-4"` is 1, unparseable or absent values are 0.
    pub fn get_int(&self, key: &str) -> i32 {
        parse_leading_int(self.get(key))
    }

    /// Float parse of a value, 0.0 on failure.
    pub fn get_float(&self, key: &str) -> f32 {
        self.get(key).trim().parse().unwrap_or(0.0)
    }

    /// Whether a value still equals its schema default.
    pub fn is_default(&self, key: &str) -> bool {
        self.get(key) == self.schema.default_value(key)
    }

    /// Whether any value was written since the last flag reset.
    pub fn was_changed(&self) -> bool {
        self.changed
    }

    pub fn reset_changed_flag(&mut self) {
        self.changed = false;
    }

    /// Key/value pairs in schema declaration order (keys outside the
    /// schema are not reported; the sidecar writer only persists expected
    /// keys).
    pub fn iter_schema(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.schema
            .defaults()
            .iter()
            .map(move |(k, _)| (*k, self.get(k)))
    }
}

fn parse_leading_int(s: &str) -> i32 {
    let s = s.trim();
    let mut end = 0;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+')) {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    s[..end].parse().unwrap_or(0)
}
