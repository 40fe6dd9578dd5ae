//! Naming model for asinpack.
//!
//! Everything the renaming rules operate on lives here: product identifiers,
//! uploaded items, variant labels, and the configuration that fixes the
//! vocabulary and accepted extensions.
//!
//! # Example
//!
//! ```
//! use asinpack::naming::{ByteSource, Identifier, UploadedItem};
//!
//! let id = Identifier::from_input("b0ffngwmv9");
//! let item = UploadedItem::new(1u64, "photo1.jpg", ByteSource::memory(vec![0u8; 4]));
//! assert_eq!(id.as_str(), "B0FFNGWMV9");
//! assert_eq!(item.file_name, "photo1.jpg");
//! ```

mod config;
mod extension;
mod identifier;
mod ids;
mod item;
mod variant;

pub use config::{
    NamingConfig, DEFAULT_EXTENSIONS, DEFAULT_OVERFLOW_OFFSET, DEFAULT_OVERFLOW_PREFIX,
    DEFAULT_VOCABULARY,
};
pub use extension::{final_extension, has_supported_extension, output_file_name};
pub use identifier::{participating, Identifier, MAX_IDENTIFIER_LEN};
pub use ids::ItemId;
pub use item::{ByteSource, UploadedItem};
pub use variant::VariantLabel;
