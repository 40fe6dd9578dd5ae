#![allow(dead_code)]

use asinpack::naming::{ByteSource, Identifier, UploadedItem, DEFAULT_EXTENSIONS};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A file name with a supported extension in random case.
pub fn arb_file_name() -> impl Strategy<Value = String> {
    (
        "[a-z0-9_]{1,12}",
        prop::sample::select(DEFAULT_EXTENSIONS.to_vec()),
        any::<bool>(),
    )
        .prop_map(|(stem, ext, upper)| {
            let ext = if upper {
                ext.to_uppercase()
            } else {
                ext.to_string()
            };
            format!("{stem}{ext}")
        })
}

/// An item list with distinct ids in insertion order.
pub fn arb_items(max_len: usize) -> impl Strategy<Value = Vec<UploadedItem>> {
    prop::collection::vec(arb_file_name(), 0..=max_len).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                UploadedItem::new(i as u64 + 1, name, ByteSource::memory(Vec::<u8>::new()))
            })
            .collect()
    })
}

/// Identifier lists mixing real codes with blank entries.
pub fn arb_identifiers(max_len: usize) -> impl Strategy<Value = Vec<Identifier>> {
    prop::collection::vec(
        prop_oneof![
            3 => "B0[A-Z0-9]{8}".prop_map(Identifier::new),
            1 => "[ ]{0,3}".prop_map(Identifier::new),
        ],
        0..=max_len,
    )
}
