//! Category identity
//!
//! Category labels are free text, but two labels that differ only in case
//! denote the same bucket. `CategoryKey` keeps the label as the user typed it
//! for display and compares, hashes and orders by a lower-cased form, so every
//! map keyed by it (budgets, per-category totals) gets case-insensitive
//! identity without ad-hoc scans.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Label used when a transaction has no category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A category label with case-insensitive identity
#[derive(Debug, Clone)]
pub struct CategoryKey {
    display: String,
    normalized: String,
}

impl CategoryKey {
    /// Create a key, trimming surrounding whitespace
    pub fn new(label: impl AsRef<str>) -> Self {
        let display = label.as_ref().trim().to_string();
        let normalized = display.to_lowercase();
        Self {
            display,
            normalized,
        }
    }

    /// The label as first written
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Check whether the label is blank
    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    /// Check whether a raw label denotes this category
    ///
    /// Compares character by character against the lower-cased form without
    /// building a new key for the label.
    pub fn matches(&self, label: &str) -> bool {
        label
            .trim()
            .chars()
            .flat_map(char::to_lowercase)
            .eq(self.normalized.chars())
    }
}

impl PartialEq for CategoryKey {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for CategoryKey {}

impl Hash for CategoryKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl PartialOrd for CategoryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CategoryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

impl From<&str> for CategoryKey {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for CategoryKey {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

// Serialized as the display label so budget maps stay plain JSON objects.
impl Serialize for CategoryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

impl<'de> Deserialize<'de> for CategoryKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::new(label))
    }
}
