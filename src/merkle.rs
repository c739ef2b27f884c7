//! Domain-separated Merkle tree construction (RFC 6962 style)
//!
//! Commits an ordered sequence of file digests to a single root value.
//! Leaves and internal nodes are hashed under distinct prefixes so a
//! leaf digest can never collide with an internal-node digest for the
//! same byte content.

use crate::error::AuditError;
use sha2::{Digest, Sha256};

/// Prefix byte for leaf hashes.
const LEAF_PREFIX: u8 = 0x00;
/// Prefix byte for internal node hashes.
const NODE_PREFIX: u8 = 0x01;

/// Hash a leaf: `SHA256(0x00 || utf8(digest_hex))`.
///
/// The tree commits to the sequence of file digest *strings*, not to
/// the raw file bytes directly.
pub fn leaf(digest_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(digest_hex.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash an internal node: `SHA256(0x01 || raw(left) || raw(right))`.
///
/// Children are concatenated as their 32 raw digest bytes, not their
/// hex text. Both inputs must be well-formed 64-char hex digests.
pub fn node(left: &str, right: &str) -> Result<String, AuditError> {
    let left_raw = decode_digest(left)?;
    let right_raw = decode_digest(right)?;

    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(left_raw);
    hasher.update(right_raw);
    Ok(hex::encode(hasher.finalize()))
}

/// Build the Merkle root over an ordered sequence of hex digests.
///
/// Construction is bottom-up: adjacent nodes are paired left-to-right
/// at each level; an odd final node is promoted unchanged to the next
/// level (no duplication, no padding hash). A single-element sequence
/// yields `leaf(h)` directly.
///
/// The root is a pure function of the ordered input sequence: any
/// reordering, insertion, deletion, or digest change produces a
/// different root.
pub fn build_root(digests: &[String]) -> Result<String, AuditError> {
    if digests.is_empty() {
        return Err(AuditError::EmptyInput(
            "cannot build a Merkle tree over zero digests".to_string(),
        ));
    }

    let mut level: Vec<String> = digests.iter().map(|h| leaf(h)).collect();

    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len() / 2 + 1);
        let mut pairs = level.chunks_exact(2);
        for pair in &mut pairs {
            next.push(node(&pair[0], &pair[1])?);
        }
        // Odd node: promote unchanged
        if let [last] = pairs.remainder() {
            next.push(last.clone());
        }
        level = next;
    }

    Ok(level.pop().unwrap_or_default())
}

fn decode_digest(hex_str: &str) -> Result<[u8; 32], AuditError> {
    let bytes = hex::decode(hex_str).map_err(|e| AuditError::ManifestFormat {
        row: 0,
        message: format!("invalid hex digest {:?}: {}", hex_str, e),
    })?;
    bytes
        .try_into()
        .map_err(|_| AuditError::ManifestFormat {
            row: 0,
            message: format!("digest is not 32 bytes: {:?}", hex_str),
        })
}
