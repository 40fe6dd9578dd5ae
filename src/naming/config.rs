//! Naming configuration: the variant vocabulary, the overflow rule and the
//! extension allow-list.
//!
//! The defaults are the fixed values every deployment uses. A config file can
//! override them, but anything else changes externally visible file names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AsinpackError;

/// The default variant vocabulary, in slot order.
pub const DEFAULT_VOCABULARY: [&str; 10] = [
    "MAIN", "FRNT", "SIDE", "BACK", "PT01", "PT02", "PT03", "PT04", "PT05", "PT06",
];

/// The default accepted image extensions (matched case-insensitively).
pub const DEFAULT_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".tif", ".tiff"];

/// Prefix of synthesized overflow labels.
pub const DEFAULT_OVERFLOW_PREFIX: &str = "PT";

/// Subtracted from the position to number overflow labels.
///
/// Position 10 becomes `PT05`, which collides with the vocabulary's own
/// `PT05`. This is the established naming and is kept as-is.
pub const DEFAULT_OVERFLOW_OFFSET: usize = 5;

/// Naming configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Variant labels for positions `0..vocabulary.len()`.
    pub vocabulary: Vec<String>,
    /// Accepted extensions, each with a leading dot.
    pub extensions: Vec<String>,
    /// Prefix for labels beyond the vocabulary.
    pub overflow_prefix: String,
    /// Offset subtracted from the position for overflow labels.
    pub overflow_offset: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            overflow_prefix: DEFAULT_OVERFLOW_PREFIX.to_string(),
            overflow_offset: DEFAULT_OVERFLOW_OFFSET,
        }
    }
}

impl NamingConfig {
    /// Loads a config file, choosing the parser by extension
    /// (`.json` for JSON, anything else as YAML).
    pub fn load(path: &Path) -> Result<Self, AsinpackError> {
        let text = fs::read_to_string(path).map_err(|source| AsinpackError::IoAt {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config: NamingConfig = if is_json {
            serde_json::from_str(&text).map_err(|e| AsinpackError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            Self::from_yaml_str(&text).map_err(|message| AsinpackError::ConfigParse {
                path: path.to_path_buf(),
                message,
            })?
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded naming config");
        Ok(config)
    }

    /// Parses YAML text without validating it.
    pub fn from_yaml_str(text: &str) -> Result<Self, String> {
        serde_yaml::from_str(text).map_err(|e| e.to_string())
    }

    /// Checks the invariants the assigner and upload source rely on.
    pub fn validate(&self) -> Result<(), AsinpackError> {
        if self.vocabulary.is_empty() {
            return Err(AsinpackError::InvalidConfig {
                message: "vocabulary must contain at least one label".to_string(),
            });
        }

        if let Some(label) = self.vocabulary.iter().find(|l| l.trim().is_empty()) {
            return Err(AsinpackError::InvalidConfig {
                message: format!("vocabulary contains a blank label '{label}'"),
            });
        }

        if self.extensions.is_empty() {
            return Err(AsinpackError::InvalidConfig {
                message: "extensions must contain at least one entry".to_string(),
            });
        }

        if let Some(ext) = self
            .extensions
            .iter()
            .find(|e| !e.starts_with('.') || e.len() < 2)
        {
            return Err(AsinpackError::InvalidConfig {
                message: format!("extension '{ext}' must start with '.' and be non-empty"),
            });
        }

        if self.overflow_offset > self.vocabulary.len() {
            return Err(AsinpackError::InvalidConfig {
                message: format!(
                    "overflow_offset {} exceeds vocabulary length {}",
                    self.overflow_offset,
                    self.vocabulary.len()
                ),
            });
        }

        Ok(())
    }
}
