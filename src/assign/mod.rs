//! Positional variant assignment.
//!
//! A variant label is a pure function of an item's position in the current
//! list. Nothing is cached per item: after any removal or reorder, calling
//! [`VariantAssigner::assign`] again yields the correct labels.

use std::collections::HashSet;

use crate::naming::{NamingConfig, UploadedItem, VariantLabel};

/// An item paired with the label for its current position.
#[derive(Clone, Debug)]
pub struct Assignment<'a> {
    pub item: &'a UploadedItem,
    pub position: usize,
    pub variant: VariantLabel,
}

/// Maps list positions to variant labels.
#[derive(Clone, Debug)]
pub struct VariantAssigner {
    vocabulary: Vec<VariantLabel>,
    overflow_prefix: String,
    overflow_offset: usize,
}

impl Default for VariantAssigner {
    fn default() -> Self {
        Self::with_config(&NamingConfig::default())
    }
}

impl VariantAssigner {
    /// Builds an assigner from a (validated) naming config.
    pub fn with_config(config: &NamingConfig) -> Self {
        Self {
            vocabulary: config
                .vocabulary
                .iter()
                .map(|l| VariantLabel::new(l.as_str()))
                .collect(),
            overflow_prefix: config.overflow_prefix.clone(),
            overflow_offset: config.overflow_offset,
        }
    }

    /// The fixed vocabulary, in slot order.
    pub fn vocabulary(&self) -> &[VariantLabel] {
        &self.vocabulary
    }

    /// Label for the item at `position` (0-based).
    ///
    /// Positions past the vocabulary get `prefix + (position - offset)`,
    /// which revisits labels already in the vocabulary (position 10 is `PT05`
    /// with the defaults).
    pub fn variant_for_position(&self, position: usize) -> VariantLabel {
        match self.vocabulary.get(position) {
            Some(label) => label.clone(),
            None => VariantLabel::overflow(
                &self.overflow_prefix,
                position.saturating_sub(self.overflow_offset),
            ),
        }
    }

    /// Labels for a list of `len` items, in order.
    pub fn labels(&self, len: usize) -> Vec<VariantLabel> {
        (0..len).map(|i| self.variant_for_position(i)).collect()
    }

    /// Pairs each item with the label for its position.
    pub fn assign<'a>(&self, items: &'a [UploadedItem]) -> Vec<Assignment<'a>> {
        items
            .iter()
            .enumerate()
            .map(|(position, item)| Assignment {
                item,
                position,
                variant: self.variant_for_position(position),
            })
            .collect()
    }

    /// Positions in a list of `len` items whose label was already used at an
    /// earlier position.
    pub fn colliding_positions(&self, len: usize) -> Vec<usize> {
        let mut seen = HashSet::new();
        (0..len)
            .filter(|&i| !seen.insert(self.variant_for_position(i)))
            .collect()
    }

    /// True if a list of `len` items produces any repeated label.
    pub fn has_collisions(&self, len: usize) -> bool {
        !self.colliding_positions(len).is_empty()
    }
}
