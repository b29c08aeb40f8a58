//! The working set of resolved arguments for a single command.
//!
//! An [`ArgumentBag`] maps option keys to [`OptionValue`]s in insertion order
//! and keeps the positional values apart under the reserved `_` key. Keys are
//! only ever added or overwritten, never removed.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A resolved option value.
///
/// `Unset` marks a key that is present but carries no value, for example when
/// the operator cancelled the value prompt. It counts as present but never renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
    Unset,
}

impl OptionValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The text seeded into a value prompt, if there is one.
    #[must_use]
    pub fn as_initial_text(&self) -> Option<String> {
        match self {
            Self::Flag(flag) => Some(flag.to_string()),
            Self::Text(text) => Some(text.clone()),
            Self::Unset => None,
        }
    }
}

impl Display for OptionValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(flag) => write!(formatter, "{flag}"),
            Self::Text(text) => formatter.write_str(text),
            Self::Unset => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentBag {
    /// `None` means the caller supplied no positional collection at all.
    #[serde(rename = "_", default, skip_serializing_if = "Option::is_none")]
    pub positionals: Option<Vec<String>>,
    #[serde(flatten)]
    pub options: IndexMap<String, OptionValue>,
}

impl ArgumentBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_positionals(positionals: Vec<String>) -> Self {
        Self {
            positionals: Some(positionals),
            options: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    /// Adds or overwrites `key`. An overwritten key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: OptionValue) {
        self.options.insert(key.into(), value);
    }

    #[must_use]
    pub fn positionals(&self) -> &[String] {
        self.positionals.as_deref().unwrap_or_default()
    }

    pub fn push_positional(&mut self, value: String) {
        self.positionals.get_or_insert_with(Vec::new).push(value);
    }
}
