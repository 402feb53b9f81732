//! Helpers for authoring `.msg` fixtures

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Write a compound file with one stream per `(name, bytes)` property
pub fn write_msg(dir: &Path, file_name: &str, streams: &[(&str, Vec<u8>)]) -> PathBuf {
    let path = dir.join(file_name);
    let mut container = cfb::create(&path).unwrap();
    for (name, bytes) in streams {
        let mut stream = container.create_stream(format!("/{name}")).unwrap();
        stream.write_all(bytes).unwrap();
        stream.flush().unwrap();
    }
    container.flush().unwrap();
    path
}

/// A `.msg` whose plain-text body is `body` (UTF-16)
pub fn write_alert(dir: &Path, file_name: &str, body: &str) -> PathBuf {
    write_msg(dir, file_name, &[("__substg1.0_1000001F", utf16(body))])
}

pub fn write_corrupt(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, b"\xd0\xcf\x11\xe0 truncated").unwrap();
    path
}
