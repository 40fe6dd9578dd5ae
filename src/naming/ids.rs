//! Newtype ID for uploaded items.
//!
//! Item identity is assigned once at upload time and never changes, even as
//! the item's position (and therefore its variant label) shifts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable identifier for an uploaded item.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Creates a new ItemId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_equality_and_ordering() {
        assert_eq!(ItemId(1), ItemId::new(1));
        assert_ne!(ItemId(1), ItemId(2));
        assert!(ItemId(1) < ItemId(2));
    }

    #[test]
    fn test_id_formatting() {
        assert_eq!(format!("{:?}", ItemId(7)), "ItemId(7)");
        assert_eq!(ItemId(7).to_string(), "7");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&ItemId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
