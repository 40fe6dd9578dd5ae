//! Packaging: writing a manifest's renamed files into a bundle.
//!
//! Packagers sit behind [`ArchivePackager`] so the naming core never depends
//! on how bytes are bundled. Two implementations are provided: a ZIP archive
//! and a plain output directory.
//!
//! A manifest may repeat an output name (duplicate identifiers, or overflow
//! labels revisiting the vocabulary). Each name is written once, with the
//! bytes of the last record carrying it; the earlier records are counted as
//! overwritten.
//!
//! Every output name must be a single plain path component. A manifest
//! holding anything else is refused before the destination is touched.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::AsinpackError;
use crate::manifest::{Manifest, OutputRecord};

/// Prefix of generated bundle names.
pub const BUNDLE_PREFIX: &str = "Amazon_Images_";

/// Bundle file name for a given time:
/// `Amazon_Images_YYYY-MM-DDTHH-MM-SS.zip`.
pub fn bundle_name(at: DateTime<Utc>) -> String {
    format!("{BUNDLE_PREFIX}{}.zip", at.format("%Y-%m-%dT%H-%M-%S"))
}

/// What a packager wrote.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    /// Where the bundle was written.
    pub destination: PathBuf,
    /// Entries written (distinct output names).
    pub entries: usize,
    /// Records superseded by a later record with the same output name.
    pub overwritten: usize,
    /// Total bytes of file content written.
    pub bytes: u64,
}

/// Consumes a manifest and produces a bundle at `dest`.
pub trait ArchivePackager {
    fn package(&self, manifest: &Manifest, dest: &Path) -> Result<PackageReport, AsinpackError>;
}

/// Writes a ZIP archive with one entry per output name.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZipPackager;

impl ZipPackager {
    /// Writes the archive to any seekable writer; `dest` is only used for
    /// error messages and the report.
    pub fn write_to<W: Write + Seek>(
        &self,
        manifest: &Manifest,
        writer: W,
        dest: &Path,
    ) -> Result<PackageReport, AsinpackError> {
        check_output_names(manifest)?;
        let zip_err = |source: zip::result::ZipError| AsinpackError::ArchiveWrite {
            path: dest.to_path_buf(),
            source,
        };

        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut report = PackageReport {
            destination: dest.to_path_buf(),
            ..Default::default()
        };

        for record in surviving_records(manifest, &mut report) {
            let bytes = read_record(record)?;
            zip.start_file(record.output_name.as_str(), options)
                .map_err(zip_err)?;
            zip.write_all(&bytes)?;
            report.entries += 1;
            report.bytes += bytes.len() as u64;
        }

        let mut inner = zip.finish().map_err(zip_err)?;
        inner.flush()?;
        Ok(report)
    }
}

impl ArchivePackager for ZipPackager {
    fn package(&self, manifest: &Manifest, dest: &Path) -> Result<PackageReport, AsinpackError> {
        check_output_names(manifest)?;
        let file = File::create(dest).map_err(|source| AsinpackError::IoAt {
            path: dest.to_path_buf(),
            source,
        })?;
        let report = match self.write_to(manifest, BufWriter::new(file), dest) {
            Ok(report) => report,
            Err(error) => {
                if let Err(cleanup) = fs::remove_file(dest) {
                    tracing::warn!(
                        path = %dest.display(),
                        error = %cleanup,
                        "failed to remove partial zip bundle"
                    );
                }
                return Err(error);
            }
        };
        tracing::info!(
            path = %dest.display(),
            entries = report.entries,
            bytes = report.bytes,
            "wrote zip bundle"
        );
        Ok(report)
    }
}

/// Copies each output file into a directory under its new name.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirPackager;

impl ArchivePackager for DirPackager {
    fn package(&self, manifest: &Manifest, dest: &Path) -> Result<PackageReport, AsinpackError> {
        check_output_names(manifest)?;
        fs::create_dir_all(dest).map_err(|source| AsinpackError::IoAt {
            path: dest.to_path_buf(),
            source,
        })?;

        let mut report = PackageReport {
            destination: dest.to_path_buf(),
            ..Default::default()
        };

        for record in surviving_records(manifest, &mut report) {
            let bytes = read_record(record)?;
            let target = dest.join(&record.output_name);
            fs::write(&target, &bytes).map_err(|source| AsinpackError::IoAt {
                path: target.clone(),
                source,
            })?;
            report.entries += 1;
            report.bytes += bytes.len() as u64;
        }

        tracing::info!(
            path = %dest.display(),
            entries = report.entries,
            "wrote renamed files"
        );
        Ok(report)
    }
}

/// Refuses output names that could resolve outside the bundle root.
fn check_output_names(manifest: &Manifest) -> Result<(), AsinpackError> {
    match manifest
        .records
        .iter()
        .find(|record| !is_plain_file_name(&record.output_name))
    {
        Some(record) => Err(AsinpackError::UnsafeOutputName {
            name: record.output_name.clone(),
        }),
        None => Ok(()),
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with("..")
        && !name.contains(&['/', '\\', ':', '\0'][..])
}

/// Records that own their output name (the last record per name), in
/// manifest order. Superseded records are counted in `report.overwritten`.
fn surviving_records<'a>(
    manifest: &'a Manifest,
    report: &mut PackageReport,
) -> Vec<&'a OutputRecord> {
    let mut last_index: HashMap<&str, usize> = HashMap::new();
    for (idx, record) in manifest.records.iter().enumerate() {
        last_index.insert(record.output_name.as_str(), idx);
    }

    let mut survivors = Vec::with_capacity(last_index.len());
    for (idx, record) in manifest.records.iter().enumerate() {
        if last_index.get(record.output_name.as_str()) == Some(&idx) {
            survivors.push(record);
        } else {
            tracing::warn!(
                output = %record.output_name,
                original = %record.original_name,
                "output name reused later in the manifest; entry overwritten"
            );
            report.overwritten += 1;
        }
    }
    survivors
}

fn read_record(record: &OutputRecord) -> Result<Vec<u8>, AsinpackError> {
    record.source.read_bytes().map_err(|source| match record.source.path() {
        Some(path) => AsinpackError::IoAt {
            path: path.to_path_buf(),
            source,
        },
        None => AsinpackError::Io(source),
    })
}
