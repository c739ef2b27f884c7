//! Content hashing using SHA-256 (FIPS 180-4)

use crate::error::AuditError;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read buffer size for streaming file digests.
///
/// Files are hashed in fixed-size chunks so memory use is independent
/// of file size.
const CHUNK_SIZE: usize = 8192;

/// Compute the SHA-256 digest of a file's content.
///
/// Streams the file in [`CHUNK_SIZE`] chunks and returns the digest as
/// a lowercase 64-character hex string. Any open or read failure is
/// fatal to the invoking operation.
pub fn hash_file(path: &Path) -> Result<String, AuditError> {
    let mut file = File::open(path).map_err(|e| AuditError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf).map_err(|e| AuditError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compute the SHA-256 digest of raw bytes, as lowercase hex.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Check that a string is a well-formed digest: exactly 64 lowercase
/// hex characters.
pub fn is_hex_digest(s: &str) -> bool {
    s.len() == 64
        && s.bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
