#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Minimal JPEG-looking bytes (SOI + EOI). Content is never inspected.
pub fn fake_image_bytes(tag: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8];
    bytes.extend_from_slice(tag.as_bytes());
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}

pub fn write_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, fake_image_bytes(name)).expect("write image file");
    path
}

pub fn write_images(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|name| write_image(dir, name)).collect()
}
