//! Variant labels: the image-slot names assigned by position.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A variant label such as `MAIN` or `PT03`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantLabel(String);

impl VariantLabel {
    /// Creates a label from any string.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Synthesizes an overflow label: `prefix` followed by `value` padded to
    /// at least two digits.
    pub fn overflow(prefix: &str, value: usize) -> Self {
        Self(format!("{prefix}{value:02}"))
    }

    /// Returns the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for VariantLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
