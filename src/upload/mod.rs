//! Upload source: turns raw files into identified, extension-checked items.
//!
//! Files whose names do not end in a supported extension are dropped without
//! error; the batch records how many were rejected.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::AsinpackError;
use crate::naming::{has_supported_extension, ByteSource, ItemId, NamingConfig, UploadedItem};

/// A file offered for upload: a name plus where its bytes live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub source: ByteSource,
}

impl RawFile {
    /// Raw file backed by a path on disk. Returns `None` when the path has no
    /// UTF-8 file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self {
            name,
            source: ByteSource::File(path.to_path_buf()),
        })
    }

    /// Raw file held in memory.
    pub fn in_memory(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            source: ByteSource::memory(bytes),
        }
    }
}

/// Items accepted from one upload, in offered order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadBatch {
    pub items: Vec<UploadedItem>,
    /// Files dropped by the extension filter.
    pub rejected: usize,
}

/// Accepts raw files and hands out stable item identities.
#[derive(Clone, Debug)]
pub struct UploadSource {
    extensions: Vec<String>,
    next_id: u64,
}

impl Default for UploadSource {
    fn default() -> Self {
        Self::new(&NamingConfig::default())
    }
}

impl UploadSource {
    /// Creates an upload source accepting the config's extensions.
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            next_id: 1,
        }
    }

    /// The accepted extensions, each with a leading dot.
    pub fn supported_extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Filters `files` by extension and assigns each survivor a new identity.
    ///
    /// Identities keep increasing across calls, so items from different
    /// batches never share an id.
    pub fn accept_raw_files(&mut self, files: Vec<RawFile>) -> UploadBatch {
        let mut batch = UploadBatch::default();

        for file in files {
            if !has_supported_extension(&file.name, &self.extensions) {
                tracing::debug!(name = %file.name, "rejected: unsupported extension");
                batch.rejected += 1;
                continue;
            }

            let id = ItemId::new(self.next_id);
            self.next_id += 1;
            batch
                .items
                .push(UploadedItem::new(id, file.name, file.source));
        }

        if batch.rejected > 0 {
            tracing::info!(
                accepted = batch.items.len(),
                rejected = batch.rejected,
                "dropped files with unsupported extensions"
            );
        }

        batch
    }
}

/// Expands input paths into raw files.
///
/// Files are taken in the order given. Directories are walked recursively and
/// contribute their files sorted by path relative to the directory. Nothing
/// is filtered here; the extension check happens in
/// [`UploadSource::accept_raw_files`].
pub fn collect_raw_files(paths: &[PathBuf]) -> Result<Vec<RawFile>, AsinpackError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found = walk_dir(path)?;
            found.sort_by_cached_key(|p| rel_string(path, p));
            files.extend(found.iter().filter_map(|p| RawFile::from_path(p)));
        } else if path.is_file() {
            match RawFile::from_path(path) {
                Some(file) => files.push(file),
                None => tracing::warn!(path = %path.display(), "skipping non UTF-8 file name"),
            }
        } else {
            return Err(AsinpackError::InputScan {
                path: path.clone(),
                message: "no such file or directory".to_string(),
            });
        }
    }

    Ok(files)
}

fn walk_dir(root: &Path) -> Result<Vec<PathBuf>, AsinpackError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|source| AsinpackError::InputScan {
            path: root.to_path_buf(),
            message: format!("failed while traversing directory: {source}"),
        })?;

        if entry.file_type().is_file() {
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

fn rel_string(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn accepts_supported_extensions_case_insensitively() {
        let mut source = UploadSource::default();
        let batch = source.accept_raw_files(vec![
            RawFile::in_memory("a.JPG", vec![1u8]),
            RawFile::in_memory("notes.txt", vec![2u8]),
            RawFile::in_memory("b.tiff", vec![3u8]),
            RawFile::in_memory("jpg", vec![4u8]),
        ]);

        let names: Vec<&str> = batch.items.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.JPG", "b.tiff"]);
        assert_eq!(batch.rejected, 2);
    }

    #[test]
    fn identities_are_unique_across_batches() {
        let mut source = UploadSource::default();
        let first = source.accept_raw_files(vec![RawFile::in_memory("a.png", vec![0u8])]);
        let second = source.accept_raw_files(vec![RawFile::in_memory("a.png", vec![0u8])]);
        assert_ne!(first.items[0].id, second.items[0].id);
    }

    #[test]
    fn supported_extensions_default_to_six() {
        let source = UploadSource::default();
        assert_eq!(
            source.supported_extensions(),
            [".jpg", ".jpeg", ".png", ".gif", ".tif", ".tiff"]
        );
    }

    #[test]
    fn directories_are_sorted_by_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.jpg"), b"b").unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        fs::write(dir.path().join("sub/c.png"), b"c").unwrap();

        let files = collect_raw_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.png"]);
    }

    #[test]
    fn explicit_files_keep_given_order() {
        let dir = tempfile::tempdir().unwrap();
        let z = dir.path().join("z.jpg");
        let a = dir.path().join("a.jpg");
        fs::write(&z, b"z").unwrap();
        fs::write(&a, b"a").unwrap();

        let files = collect_raw_files(&[z, a]).unwrap();
        assert_eq!(files[0].name, "z.jpg");
        assert_eq!(files[1].name, "a.jpg");
    }

    #[test]
    fn missing_path_is_an_error() {
        let err = collect_raw_files(&[PathBuf::from("definitely/not/here")]).unwrap_err();
        assert!(matches!(err, AsinpackError::InputScan { .. }));
    }
}
