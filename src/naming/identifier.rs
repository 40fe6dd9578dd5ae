//! Product identifiers (ASIN codes).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of characters kept when an identifier is edited.
pub const MAX_IDENTIFIER_LEN: usize = 10;

/// A product identifier as supplied by the caller.
///
/// The raw string is kept verbatim and is what ends up in output file names.
/// Only the trimmed form decides whether the identifier participates in a
/// build: blank identifiers are skipped, duplicates are not.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Wraps a raw identifier without any normalisation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Normalises user input at edit time: ASCII alphanumerics only,
    /// uppercased, at most [`MAX_IDENTIFIER_LEN`] characters.
    pub fn from_input(input: &str) -> Self {
        Self(
            input
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .take(MAX_IDENTIFIER_LEN)
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        )
    }

    /// The identifier exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The whitespace-trimmed form.
    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }

    /// True if the identifier has no content after trimming.
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Identifier {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Returns the identifiers that participate in a build, in their given order.
pub fn participating(identifiers: &[Identifier]) -> Vec<&Identifier> {
    identifiers.iter().filter(|id| !id.is_blank()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_input_uppercases_and_truncates() {
        assert_eq!(Identifier::from_input("b0ffngwmv9").as_str(), "B0FFNGWMV9");
        assert_eq!(
            Identifier::from_input("b0ffngwmv9extra").as_str(),
            "B0FFNGWMV9"
        );
    }

    #[test]
    fn from_input_drops_path_characters() {
        assert_eq!(Identifier::from_input("../../esc").as_str(), "ESC");
        assert_eq!(Identifier::from_input("/tmp/x").as_str(), "TMPX");
        assert_eq!(Identifier::from_input("b0-ffn gw\\mv9").as_str(), "B0FFNGWMV9");
        assert!(Identifier::from_input("../").is_blank());
    }

    #[test]
    fn raw_form_is_preserved() {
        let id = Identifier::new(" B0X ");
        assert_eq!(id.as_str(), " B0X ");
        assert_eq!(id.trimmed(), "B0X");
        assert!(!id.is_blank());
    }

    #[test]
    fn participating_skips_blank_but_keeps_duplicates() {
        let ids = vec![
            Identifier::new("A1"),
            Identifier::new("   "),
            Identifier::new(""),
            Identifier::new("A1"),
        ];
        let kept: Vec<&str> = participating(&ids).iter().map(|i| i.as_str()).collect();
        assert_eq!(kept, vec!["A1", "A1"]);
    }
}
