//! Processing session: the state machine that decides when a build may run.
//!
//! A [`Session`] owns the identifier slots, the uploaded items and the last
//! manifest. It exposes operations rather than fields so any front end (the
//! CLI, a service, a GUI) drives it the same way.
//!
//! ```text
//! Idle --process (gate open)--> Processing --> Completed
//!                                   |
//!                                   +--(build error)--> Error
//! any --reset--> Idle
//! ```

use serde::Serialize;

use crate::assign::Assignment;
use crate::error::AsinpackError;
use crate::manifest::{Manifest, ManifestBuilder, ManifestReport};
use crate::naming::{participating, Identifier, ItemId, NamingConfig, UploadedItem};
use crate::upload::{RawFile, UploadSource};

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Processing,
    Completed,
    Error,
}

/// Result of a [`Session::process`] call that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// No non-blank identifier or no items; nothing ran and the status is
    /// unchanged.
    GateNotMet,
    /// The manifest was rebuilt.
    Completed(ManifestReport),
}

/// Counts shown alongside a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub identifiers: usize,
    pub items_uploaded: usize,
    pub variants_used: usize,
    pub files_generated: usize,
}

/// One processing session.
#[derive(Debug)]
pub struct Session {
    config: NamingConfig,
    builder: ManifestBuilder,
    upload: UploadSource,
    identifiers: Vec<Identifier>,
    items: Vec<UploadedItem>,
    status: ProcessingStatus,
    manifest: Manifest,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(NamingConfig::default())
    }
}

impl Session {
    /// Starts an idle session with one empty identifier slot.
    pub fn new(config: NamingConfig) -> Self {
        Self {
            builder: ManifestBuilder::new(&config),
            upload: UploadSource::new(&config),
            config,
            identifiers: vec![Identifier::default()],
            items: Vec::new(),
            status: ProcessingStatus::Idle,
            manifest: Manifest::default(),
        }
    }

    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    /// All identifier slots, blank ones included.
    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// Identifiers that would take part in a build.
    pub fn valid_identifiers(&self) -> Vec<&Identifier> {
        participating(&self.identifiers)
    }

    /// Appends an empty identifier slot and returns its index.
    pub fn add_identifier_slot(&mut self) -> usize {
        self.identifiers.push(Identifier::default());
        self.identifiers.len() - 1
    }

    /// Sets the slot at `index`, uppercasing and truncating the input.
    /// Returns false if the index is out of range.
    pub fn set_identifier(&mut self, index: usize, value: &str) -> bool {
        match self.identifiers.get_mut(index) {
            Some(slot) => {
                *slot = Identifier::from_input(value);
                true
            }
            None => false,
        }
    }

    /// Removes the slot at `index`. The last remaining slot cannot be
    /// removed.
    pub fn remove_identifier(&mut self, index: usize) -> bool {
        if self.identifiers.len() <= 1 || index >= self.identifiers.len() {
            return false;
        }
        self.identifiers.remove(index);
        true
    }

    /// Replaces the identifier slots wholesale, normalising each value.
    pub fn set_identifiers<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots: Vec<Identifier> = values
            .into_iter()
            .map(|v| Identifier::from_input(v.as_ref()))
            .collect();
        if slots.is_empty() {
            slots.push(Identifier::default());
        }
        self.identifiers = slots;
    }

    /// Uploaded items in their current order.
    pub fn items(&self) -> &[UploadedItem] {
        &self.items
    }

    /// Replaces the item list with the accepted subset of `files`.
    /// Returns the number of rejected files.
    pub fn upload(&mut self, files: Vec<RawFile>) -> usize {
        let batch = self.upload.accept_raw_files(files);
        self.items = batch.items;
        batch.rejected
    }

    /// Removes an item by identity. Labels of the remaining items follow
    /// their new positions.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Variant assignment for the current item order, computed fresh.
    pub fn assignments(&self) -> Vec<Assignment<'_>> {
        self.builder.assigner().assign(&self.items)
    }

    /// True if a build would run.
    pub fn can_process(&self) -> bool {
        ManifestBuilder::gate_open(&self.identifiers, &self.items)
    }

    /// Builds the manifest from the current identifiers and items.
    ///
    /// From `Completed`, this simply recomputes. A build error leaves the
    /// session in `Error` with an empty manifest.
    pub fn process(&mut self) -> Result<ProcessOutcome, AsinpackError> {
        if !self.can_process() {
            tracing::debug!(status = ?self.status, "process requested but gate not met");
            return Ok(ProcessOutcome::GateNotMet);
        }

        self.status = ProcessingStatus::Processing;
        self.manifest = Manifest::default();

        match self.builder.build(&self.identifiers, &self.items) {
            Ok(manifest) => {
                let report = self
                    .builder
                    .report(&self.identifiers, &self.items, &manifest);
                self.manifest = manifest;
                self.status = ProcessingStatus::Completed;
                Ok(ProcessOutcome::Completed(report))
            }
            Err(err) => {
                tracing::error!(error = %err, "manifest build failed");
                self.status = ProcessingStatus::Error;
                Err(err)
            }
        }
    }

    /// The last built manifest (empty unless `Completed`).
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The processing log of the last build.
    pub fn log(&self) -> &[String] {
        &self.manifest.log
    }

    /// Counts for the current state.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            identifiers: self.valid_identifiers().len(),
            items_uploaded: self.items.len(),
            variants_used: self
                .items
                .len()
                .min(self.builder.assigner().vocabulary().len()),
            files_generated: self.manifest.len(),
        }
    }

    /// Discards identifiers, items, manifest and log; back to `Idle`.
    pub fn reset(&mut self) {
        self.identifiers = vec![Identifier::default()];
        self.items.clear();
        self.manifest = Manifest::default();
        self.status = ProcessingStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<RawFile> {
        names
            .iter()
            .map(|n| RawFile::in_memory(*n, n.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn new_session_is_idle_with_one_slot() {
        let session = Session::default();
        assert_eq!(session.status(), ProcessingStatus::Idle);
        assert_eq!(session.identifiers().len(), 1);
        assert!(!session.can_process());
    }

    #[test]
    fn blank_identifiers_keep_session_idle() {
        let mut session = Session::default();
        session.set_identifiers(["", "  "]);
        session.upload(files(&["a.jpg"]));

        let outcome = session.process().unwrap();
        assert_eq!(outcome, ProcessOutcome::GateNotMet);
        assert_eq!(session.status(), ProcessingStatus::Idle);
        assert!(session.manifest().is_empty());
    }

    #[test]
    fn successful_process_completes() {
        let mut session = Session::default();
        session.set_identifier(0, "b0ffngwmv9");
        let rejected = session.upload(files(&["a.jpg", "readme.md", "b.png"]));
        assert_eq!(rejected, 1);

        let outcome = session.process().unwrap();
        let ProcessOutcome::Completed(report) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(report.files_generated, 2);
        assert_eq!(session.status(), ProcessingStatus::Completed);
        assert_eq!(session.manifest().records[0].output_name, "B0FFNGWMV9.MAIN.jpg");
        assert_eq!(session.log().len(), 4);
    }

    #[test]
    fn reprocess_from_completed_recomputes() {
        let mut session = Session::default();
        session.set_identifiers(["A1"]);
        session.upload(files(&["a.jpg", "b.jpg"]));
        session.process().unwrap();

        let first = session.items()[0].id;
        assert!(session.remove_item(first));
        session.process().unwrap();

        assert_eq!(session.status(), ProcessingStatus::Completed);
        assert_eq!(session.manifest().len(), 1);
        assert_eq!(session.manifest().records[0].original_name, "b.jpg");
        assert_eq!(session.manifest().records[0].variant, "MAIN");
    }

    #[test]
    fn removal_rederives_assignments() {
        let mut session = Session::default();
        session.upload(files(&["a.jpg", "b.jpg", "c.jpg"]));
        let middle = session.items()[1].id;
        session.remove_item(middle);

        let labels: Vec<String> = session
            .assignments()
            .iter()
            .map(|a| a.variant.to_string())
            .collect();
        assert_eq!(labels, vec!["MAIN", "FRNT"]);
        assert!(!session.remove_item(middle));
    }

    #[test]
    fn last_identifier_slot_cannot_be_removed() {
        let mut session = Session::default();
        assert!(!session.remove_identifier(0));
        let idx = session.add_identifier_slot();
        assert!(session.remove_identifier(idx));
        assert!(!session.set_identifier(5, "X"));
    }

    #[test]
    fn build_error_moves_to_error_state() {
        let mut session = Session::default();
        session.set_identifiers(["A1"]);
        // Bypass the upload filter to get a name without an extension.
        session.items.push(UploadedItem::new(
            99u64,
            "broken",
            crate::naming::ByteSource::memory(Vec::<u8>::new()),
        ));

        assert!(session.process().is_err());
        assert_eq!(session.status(), ProcessingStatus::Error);
        assert!(session.manifest().is_empty());
    }

    #[test]
    fn reset_wipes_everything() {
        let mut session = Session::default();
        session.set_identifiers(["A1", "B2"]);
        session.upload(files(&["a.jpg"]));
        session.process().unwrap();

        session.reset();
        assert_eq!(session.status(), ProcessingStatus::Idle);
        assert_eq!(session.identifiers(), &[Identifier::default()]);
        assert!(session.items().is_empty());
        assert!(session.log().is_empty());
        assert_eq!(session.summary(), SessionSummary::default());
    }
}
