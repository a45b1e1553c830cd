use std::io::Read;
use std::path::Path;

use md5::{Digest, Md5};

use crate::errors::BridgeError;

/// Streaming MD5 over a file, 64KB chunks, matching the buffered-read shape
/// used elsewhere in this codebase for checksum verification.
pub fn md5_file(path: &Path) -> miette::Result<String> {
    let mut file = std::fs::File::open(path).map_err(BridgeError::Io)?;
    let mut hasher = Md5::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf).map_err(BridgeError::Io)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex(&hasher.finalize()))
}

pub fn md5_bytes(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    hex(&hasher.finalize())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Extracts the checksum from an `.md5` sidecar body: the first 32 hex
/// characters on the first non-blank line, tolerant of the
/// `<hash>  <filename>` form some repositories emit.
pub fn extract_md5(body: &str) -> Option<String> {
    let first_token = body.split_whitespace().next()?;
    let hex: String = first_token
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .take(32)
        .collect();
    if hex.len() == 32 {
        Some(hex.to_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_plain_hash() {
        let body = "d41d8cd98f00b204e9800998ecf8427e";
        assert_eq!(
            extract_md5(body).as_deref(),
            Some("d41d8cd98f00b204e9800998ecf8427e")
        );
    }

    #[test]
    fn extract_hash_with_filename() {
        let body = "d41d8cd98f00b204e9800998ecf8427e  widget-1.2.3.jar\n";
        assert_eq!(
            extract_md5(body).as_deref(),
            Some("d41d8cd98f00b204e9800998ecf8427e")
        );
    }

    #[test]
    fn extract_rejects_short_garbage() {
        assert_eq!(extract_md5("not-a-hash"), None);
    }

    #[test]
    fn md5_bytes_matches_known_vector() {
        assert_eq!(md5_bytes(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn md5_file_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.bin");
        std::fs::write(&path, b"hello world").unwrap();
        assert_eq!(md5_file(&path).unwrap(), md5_bytes(b"hello world"));
    }
}
