use std::path::PathBuf;
use thiserror::Error;

/// The main error type for asinpack operations.
#[derive(Debug, Error)]
pub enum AsinpackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error at {path}: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File name '{file_name}' has no extension; cannot build an output name")]
    MalformedFilename { file_name: String },

    #[error("Output name '{name}' is not a plain file name; refusing to write it")]
    UnsafeOutputName { name: String },

    #[error("Failed to parse naming config from {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid naming config: {message}")]
    InvalidConfig { message: String },

    #[error("Failed while scanning {path}: {message}")]
    InputScan { path: PathBuf, message: String },

    #[error("Failed to write archive {path}: {source}")]
    ArchiveWrite {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to serialize manifest: {source}")]
    ManifestSerialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write manifest CSV: {source}")]
    ManifestCsv {
        #[source]
        source: csv::Error,
    },

    #[error("No ASIN codes given (pass --asin or --asin-file with at least one non-blank code)")]
    NoIdentifiers,

    #[error("No supported image files found ({rejected} file(s) rejected by extension)")]
    NoItems { rejected: usize },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
