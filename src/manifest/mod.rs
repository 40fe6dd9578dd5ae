//! Manifest construction: expanding identifiers × uploaded items into output
//! records.
//!
//! The manifest is ordered identifier-major, item-minor. Every uploaded item
//! contributes one record per participating identifier, paired with the
//! variant label for its current position.

mod report;

pub use report::ManifestReport;

use serde::Serialize;

use crate::assign::VariantAssigner;
use crate::error::AsinpackError;
use crate::naming::{
    output_file_name, participating, ByteSource, Identifier, ItemId, NamingConfig, UploadedItem,
    VariantLabel,
};

/// One renamed output file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub identifier: Identifier,
    pub variant: VariantLabel,
    pub original_name: String,
    pub output_name: String,
    pub item_id: ItemId,
    /// Bytes of the originating item, read only by packagers.
    #[serde(skip)]
    pub source: ByteSource,
}

/// The result of a build: output records plus a human-readable log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub records: Vec<OutputRecord>,
    pub log: Vec<String>,
}

impl Manifest {
    /// True if the build produced no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Serializes the manifest (records and log) as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, AsinpackError> {
        serde_json::to_string_pretty(self)
            .map_err(|source| AsinpackError::ManifestSerialize { source })
    }

    /// Writes the records as CSV with a header row.
    pub fn to_csv_string(&self) -> Result<String, AsinpackError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["identifier", "variant", "original_name", "output_name"])
            .map_err(|source| AsinpackError::ManifestCsv { source })?;

        for record in &self.records {
            writer
                .write_record([
                    record.identifier.as_str(),
                    record.variant.as_str(),
                    record.original_name.as_str(),
                    record.output_name.as_str(),
                ])
                .map_err(|source| AsinpackError::ManifestCsv { source })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AsinpackError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| AsinpackError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

/// Builds manifests from identifiers and the current item list.
#[derive(Clone, Debug, Default)]
pub struct ManifestBuilder {
    assigner: VariantAssigner,
}

impl ManifestBuilder {
    /// Creates a builder using the given naming config.
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            assigner: VariantAssigner::with_config(config),
        }
    }

    /// Returns the assigner used for positional labels.
    pub fn assigner(&self) -> &VariantAssigner {
        &self.assigner
    }

    /// True if a build with these inputs would do anything: at least one
    /// non-blank identifier and at least one item.
    pub fn gate_open(identifiers: &[Identifier], items: &[UploadedItem]) -> bool {
        !items.is_empty() && identifiers.iter().any(|id| !id.is_blank())
    }

    /// Expands identifiers × items into a manifest.
    ///
    /// Returns an empty manifest when the gate is closed. Fails with
    /// [`AsinpackError::MalformedFilename`] if any item name has no `.`; no
    /// partial manifest is returned in that case.
    pub fn build(
        &self,
        identifiers: &[Identifier],
        items: &[UploadedItem],
    ) -> Result<Manifest, AsinpackError> {
        if !Self::gate_open(identifiers, items) {
            tracing::debug!(
                identifiers = identifiers.len(),
                items = items.len(),
                "build gate not met; nothing to do"
            );
            return Ok(Manifest::default());
        }

        let asins = participating(identifiers);
        let assignments = self.assigner.assign(items);

        let mut records = Vec::with_capacity(asins.len() * assignments.len());
        let mut log = Vec::with_capacity(1 + asins.len() * (assignments.len() + 1));

        log.push(format!(
            "Starting processing for {} ASINs with {} variants",
            asins.len(),
            assignments.len()
        ));

        for (asin_index, asin) in asins.iter().enumerate() {
            log.push(format!(
                "Processing ASIN {}/{}: {}",
                asin_index + 1,
                asins.len(),
                asin
            ));

            for assignment in &assignments {
                let item = assignment.item;
                let output_name =
                    output_file_name(asin.as_str(), assignment.variant.as_str(), &item.file_name)?;

                tracing::debug!(
                    asin = %asin,
                    variant = %assignment.variant,
                    original = %item.file_name,
                    output = %output_name,
                    "renamed"
                );
                log.push(format!("  {} -> {}", item.file_name, output_name));

                records.push(OutputRecord {
                    identifier: (*asin).clone(),
                    variant: assignment.variant.clone(),
                    original_name: item.file_name.clone(),
                    output_name,
                    item_id: item.id,
                    source: item.source.clone(),
                });
            }
        }

        let collisions = self.assigner.colliding_positions(items.len());
        if !collisions.is_empty() {
            tracing::warn!(
                positions = ?collisions,
                "overflow variant labels repeat labels already used earlier in the list"
            );
        }

        tracing::info!(
            asins = asins.len(),
            items = items.len(),
            records = records.len(),
            "manifest built"
        );

        Ok(Manifest { records, log })
    }

    /// Summarises a manifest built from `identifiers` and `items`.
    pub fn report(
        &self,
        identifiers: &[Identifier],
        items: &[UploadedItem],
        manifest: &Manifest,
    ) -> ManifestReport {
        ManifestReport::new(identifiers, items, manifest, &self.assigner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, name: &str) -> UploadedItem {
        UploadedItem::new(id, name, ByteSource::memory(name.as_bytes().to_vec()))
    }

    fn ids(raw: &[&str]) -> Vec<Identifier> {
        raw.iter().map(|s| Identifier::new(*s)).collect()
    }

    #[test]
    fn build_two_asins_two_items() {
        let builder = ManifestBuilder::default();
        let items = vec![item(1, "photo1.jpg"), item(2, "photo2.png")];
        let manifest = builder
            .build(&ids(&["B0FFNGWMV9", "B0AAA11111"]), &items)
            .unwrap();

        let got: Vec<(&str, &str, &str, &str)> = manifest
            .records
            .iter()
            .map(|r| {
                (
                    r.identifier.as_str(),
                    r.variant.as_str(),
                    r.original_name.as_str(),
                    r.output_name.as_str(),
                )
            })
            .collect();

        assert_eq!(
            got,
            vec![
                ("B0FFNGWMV9", "MAIN", "photo1.jpg", "B0FFNGWMV9.MAIN.jpg"),
                ("B0FFNGWMV9", "FRNT", "photo2.png", "B0FFNGWMV9.FRNT.png"),
                ("B0AAA11111", "MAIN", "photo1.jpg", "B0AAA11111.MAIN.jpg"),
                ("B0AAA11111", "FRNT", "photo2.png", "B0AAA11111.FRNT.png"),
            ]
        );
    }

    #[test]
    fn log_has_summary_then_asin_then_record_lines() {
        let builder = ManifestBuilder::default();
        let items = vec![item(1, "a.jpg"), item(2, "b.jpg")];
        let manifest = builder.build(&ids(&["X1", "", "Y2"]), &items).unwrap();

        assert_eq!(
            manifest.log,
            vec![
                "Starting processing for 2 ASINs with 2 variants",
                "Processing ASIN 1/2: X1",
                "  a.jpg -> X1.MAIN.jpg",
                "  b.jpg -> X1.FRNT.jpg",
                "Processing ASIN 2/2: Y2",
                "  a.jpg -> Y2.MAIN.jpg",
                "  b.jpg -> Y2.FRNT.jpg",
            ]
        );
    }

    #[test]
    fn blank_identifiers_close_the_gate() {
        let builder = ManifestBuilder::default();
        let items = vec![item(1, "a.jpg")];
        let manifest = builder.build(&ids(&["", "  "]), &items).unwrap();
        assert!(manifest.is_empty());
        assert!(manifest.log.is_empty());
        assert!(!ManifestBuilder::gate_open(&ids(&["", "  "]), &items));
    }

    #[test]
    fn no_items_closes_the_gate() {
        let builder = ManifestBuilder::default();
        let manifest = builder.build(&ids(&["X1"]), &[]).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn identifiers_are_used_as_supplied() {
        let builder = ManifestBuilder::default();
        let manifest = builder
            .build(&ids(&["x1", "x1"]), &[item(1, "a.jpg")])
            .unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.records[0].output_name, "x1.MAIN.jpg");
        assert_eq!(manifest.records[1].output_name, "x1.MAIN.jpg");
    }

    #[test]
    fn extension_case_is_preserved() {
        let builder = ManifestBuilder::default();
        let manifest = builder.build(&ids(&["X"]), &[item(1, "Photo.JPG")]).unwrap();
        assert_eq!(manifest.records[0].output_name, "X.MAIN.JPG");
    }

    #[test]
    fn every_item_participates_past_the_vocabulary() {
        let builder = ManifestBuilder::default();
        let items: Vec<UploadedItem> = (0..12).map(|i| item(i, &format!("p{i}.jpg"))).collect();
        let manifest = builder.build(&ids(&["X"]), &items).unwrap();

        assert_eq!(manifest.len(), 12);
        assert_eq!(manifest.records[10].output_name, "X.PT05.jpg");
        assert_eq!(manifest.records[11].output_name, "X.PT06.jpg");
    }

    #[test]
    fn malformed_filename_aborts_build() {
        let builder = ManifestBuilder::default();
        let items = vec![item(1, "ok.jpg"), item(2, "noextension")];
        let err = builder.build(&ids(&["X"]), &items).unwrap_err();
        match err {
            AsinpackError::MalformedFilename { file_name } => assert_eq!(file_name, "noextension"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn csv_export_has_header_and_rows() {
        let builder = ManifestBuilder::default();
        let manifest = builder.build(&ids(&["X"]), &[item(1, "a.png")]).unwrap();
        let csv = manifest.to_csv_string().unwrap();
        assert_eq!(
            csv,
            "identifier,variant,original_name,output_name\nX,MAIN,a.png,X.MAIN.png\n"
        );
    }

    #[test]
    fn json_export_skips_byte_source() {
        let builder = ManifestBuilder::default();
        let manifest = builder.build(&ids(&["X"]), &[item(1, "a.png")]).unwrap();
        let json = manifest.to_json_string().unwrap();
        assert!(json.contains("\"output_name\": \"X.MAIN.png\""));
        assert!(!json.contains("source"));
    }
}
