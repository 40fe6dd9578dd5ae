//! Fuzz target for manifest building.
//!
//! Splits the input into identifier and file-name lines and builds a
//! manifest, checking for panics. Malformed names must surface as errors.

#![no_main]

use asinpack::manifest::ManifestBuilder;
use asinpack::naming::{ByteSource, Identifier, UploadedItem};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let (ids_part, names_part) = text.split_once('\0').unwrap_or((text, ""));
    let identifiers: Vec<Identifier> = ids_part.lines().map(Identifier::new).collect();
    let items: Vec<UploadedItem> = names_part
        .lines()
        .enumerate()
        .map(|(i, name)| UploadedItem::new(i as u64, name, ByteSource::memory(Vec::<u8>::new())))
        .collect();

    let _ = ManifestBuilder::default().build(&identifiers, &items);
});
