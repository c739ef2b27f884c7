//! Manifest: the ordered, durable record of per-file audit state

use crate::digest::is_hex_digest;
use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// One audited file: where it lives, what it hashed to, how big it was.
///
/// `relative_path` is unique within a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path on disk at audit time.
    pub path: PathBuf,
    /// Path relative to the audit target.
    pub relative_path: String,
    /// Lowercase 64-hex-char SHA-256 content digest.
    pub content_hash: String,
    /// File size in bytes at audit time.
    pub size_bytes: u64,
}

/// Ordered sequence of file records.
///
/// The order is semantically significant: it is the leaf order fed to
/// the Merkle builder. Persisted row order is preserved verbatim on
/// reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    records: Vec<FileRecord>,
}

impl Manifest {
    /// Build a manifest from ordered records, validating structural
    /// invariants: well-formed digests and unique relative paths.
    pub fn new(records: Vec<FileRecord>) -> Result<Self, AuditError> {
        let mut seen = HashSet::new();
        for (i, record) in records.iter().enumerate() {
            validate_record(record, i + 1)?;
            if !seen.insert(record.relative_path.as_str()) {
                return Err(AuditError::ManifestFormat {
                    row: i + 1,
                    message: format!("duplicate relative path {:?}", record.relative_path),
                });
            }
        }
        Ok(Self { records })
    }

    /// The records, in manifest order.
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Content digests in manifest order, for the Merkle builder.
    pub fn digests(&self) -> Vec<String> {
        self.records.iter().map(|r| r.content_hash.clone()).collect()
    }

    /// Sum of recorded file sizes.
    pub fn total_size_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.size_bytes).sum()
    }

    /// Serialize to a CSV table with a fixed header, one row per
    /// record, preserving record order.
    pub fn write(&self, path: &Path) -> Result<(), AuditError> {
        let file = File::create(path).map_err(|e| AuditError::io(path, e))?;
        let mut writer = csv::Writer::from_writer(file);
        for record in &self.records {
            writer
                .serialize(record)
                .map_err(|e| csv_error(path, e))?;
        }
        writer.flush().map_err(|e| AuditError::io(path, e))?;
        Ok(())
    }

    /// Deserialize from a CSV table, rejecting malformed rows with a
    /// structural error rather than silently coercing.
    pub fn read(path: &Path) -> Result<Self, AuditError> {
        let file = File::open(path).map_err(|e| AuditError::io(path, e))?;
        let mut reader = csv::Reader::from_reader(file);

        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<FileRecord>().enumerate() {
            let record = row.map_err(|e| AuditError::ManifestFormat {
                row: i + 1,
                message: e.to_string(),
            })?;
            records.push(record);
        }

        Self::new(records)
    }
}

fn validate_record(record: &FileRecord, row: usize) -> Result<(), AuditError> {
    if !is_hex_digest(&record.content_hash) {
        return Err(AuditError::ManifestFormat {
            row,
            message: format!(
                "content hash is not 64 lowercase hex chars: {:?}",
                record.content_hash
            ),
        });
    }
    if record.relative_path.is_empty() {
        return Err(AuditError::ManifestFormat {
            row,
            message: "empty relative path".to_string(),
        });
    }
    Ok(())
}

fn csv_error(path: &Path, e: csv::Error) -> AuditError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => AuditError::io(path, io),
        other => AuditError::ManifestFormat {
            row: 0,
            message: format!("{:?}", other),
        },
    }
}
