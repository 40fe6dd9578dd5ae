//! Summary counts for a built manifest.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::Manifest;
use crate::assign::VariantAssigner;
use crate::naming::{participating, Identifier, UploadedItem};

/// Counts describing what a build did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ManifestReport {
    /// Identifiers that took part (non-blank after trim).
    pub identifiers: usize,
    /// Items in the uploaded list.
    pub items: usize,
    /// Vocabulary slots in use: `min(items, vocabulary length)`.
    pub variants_used: usize,
    /// Output records generated.
    pub files_generated: usize,
    /// Records whose output name repeats an earlier record's.
    pub duplicate_output_names: usize,
    /// Item positions whose overflow label repeats an earlier label.
    pub overflow_collisions: Vec<usize>,
}

impl ManifestReport {
    pub(crate) fn new(
        identifiers: &[Identifier],
        items: &[UploadedItem],
        manifest: &Manifest,
        assigner: &VariantAssigner,
    ) -> Self {
        let mut seen = HashSet::new();
        let duplicate_output_names = manifest
            .records
            .iter()
            .filter(|r| !seen.insert(r.output_name.as_str()))
            .count();

        Self {
            identifiers: participating(identifiers).len(),
            items: items.len(),
            variants_used: items.len().min(assigner.vocabulary().len()),
            files_generated: manifest.records.len(),
            duplicate_output_names,
            overflow_collisions: assigner.colliding_positions(items.len()),
        }
    }

    /// True if packaging would overwrite some entries.
    pub fn has_duplicates(&self) -> bool {
        self.duplicate_output_names > 0
    }
}

impl fmt::Display for ManifestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} ASIN(s), {} image(s), {} variant(s) used, {} file(s) generated",
            self.identifiers, self.items, self.variants_used, self.files_generated
        )?;

        if !self.overflow_collisions.is_empty() {
            writeln!(
                f,
                "  note: overflow labels at position(s) {:?} repeat earlier labels",
                self.overflow_collisions
            )?;
        }

        if self.duplicate_output_names > 0 {
            writeln!(
                f,
                "  note: {} record(s) share an output name with an earlier record",
                self.duplicate_output_names
            )?;
        }

        Ok(())
    }
}
