//! Uploaded items and the byte sources behind them.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::ids::ItemId;

/// Where an item's bytes live.
///
/// The naming core never reads this; only packagers do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ByteSource {
    /// A file on disk, read lazily at packaging time.
    File(PathBuf),
    /// Bytes already held in memory.
    Memory(Arc<[u8]>),
}

impl ByteSource {
    /// Wraps in-memory bytes.
    pub fn memory(bytes: impl Into<Vec<u8>>) -> Self {
        ByteSource::Memory(Arc::from(bytes.into()))
    }

    /// Reads the full contents of the source.
    pub fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match self {
            ByteSource::File(path) => fs::read(path),
            ByteSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }

    /// Returns the backing path for file sources.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ByteSource::File(path) => Some(path),
            ByteSource::Memory(_) => None,
        }
    }
}

/// One source image accepted by the upload source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedItem {
    /// Stable identity, assigned at upload time.
    pub id: ItemId,
    /// Original file name, including extension.
    pub file_name: String,
    /// Handle to the item's bytes.
    pub source: ByteSource,
}

impl UploadedItem {
    /// Creates a new uploaded item.
    pub fn new(id: impl Into<ItemId>, file_name: impl Into<String>, source: ByteSource) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            source,
        }
    }
}
