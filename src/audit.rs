//! Audit orchestrator: Scan → Hash → Manifest → Root → CommitmentRecord
//!
//! The pipeline is strictly sequential and fail-fast. Everything is
//! computed in memory first; artifacts are only written once the whole
//! run has succeeded, so a failed audit leaves prior persisted state
//! untouched.

use crate::config::SealConfig;
use crate::digest;
use crate::error::AuditError;
use crate::manifest::{FileRecord, Manifest};
use crate::merkle;
use crate::scan::{canonical_root, Scanner};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// On-disk schema version of the commitment record.
pub const SCHEMA_VERSION: u32 = 2;

/// Manifest artifact file name.
pub const MANIFEST_FILE: &str = "manifest.csv";
/// Standalone Merkle root artifact file name.
pub const ROOT_FILE: &str = "merkle_root.txt";
/// Commitment record artifact file name.
pub const COMMITMENT_FILE: &str = "commitment.json";

/// The persisted summary record binding a target directory, a point in
/// time, and a Merkle root together.
///
/// Created once per audit and immutable thereafter. The root is also
/// persisted standalone so verification can cross-check the two copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentRecord {
    pub schema_version: u32,
    pub merkle_root: String,
    pub generated_at: DateTime<Utc>,
    pub target_path: String,
    pub file_count: u64,
    pub total_size_bytes: u64,
    pub platform: String,
}

/// Resolved locations of the persisted audit artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    /// The metadata directory holding all artifacts.
    pub dir: PathBuf,
    pub manifest: PathBuf,
    pub root: PathBuf,
    pub commitment: PathBuf,
}

impl ArtifactPaths {
    /// Resolve artifact locations for a target. The default location is
    /// the reserved metadata directory inside the target; callers may
    /// override it.
    pub fn resolve(target: &Path, output_dir: Option<&Path>, metadata_dir: &str) -> Self {
        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => target.join(metadata_dir),
        };
        Self {
            manifest: dir.join(MANIFEST_FILE),
            root: dir.join(ROOT_FILE),
            commitment: dir.join(COMMITMENT_FILE),
            dir,
        }
    }

    /// Names of artifacts that do not exist on disk, in a fixed order.
    pub fn missing(&self) -> Vec<String> {
        [
            (&self.manifest, MANIFEST_FILE),
            (&self.root, ROOT_FILE),
            (&self.commitment, COMMITMENT_FILE),
        ]
        .iter()
        .filter(|(path, _)| !path.is_file())
        .map(|(_, name)| name.to_string())
        .collect()
    }
}

/// Run a full audit of `target`.
///
/// Scans the tree, hashes every file, builds the manifest and the
/// Merkle commitment, then persists `manifest.csv`, `merkle_root.txt`,
/// and `commitment.json` into the metadata directory. Re-running
/// overwrites all artifacts.
///
/// Fatal (nothing written): empty target, any file-level I/O error.
#[instrument(skip(config), fields(target = %target.display()))]
pub fn audit(
    target: &Path,
    output_dir: Option<&Path>,
    config: &SealConfig,
) -> Result<CommitmentRecord, AuditError> {
    let start = Instant::now();
    let target = canonical_root(target)?;
    info!("Starting audit");

    // Step 1: scan. An empty target aborts before anything is written.
    let scanner = Scanner::new(target.clone(), config.scan_config());
    let entries = scanner.scan()?;
    if entries.is_empty() {
        return Err(AuditError::EmptyInput(format!(
            "no files found under {:?}",
            target
        )));
    }
    debug!(file_count = entries.len(), "Scan completed");

    // Step 2: hash every file, in scan order. Any failure is fatal.
    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let content_hash = digest::hash_file(&entry.path)?;
        records.push(FileRecord {
            path: entry.path,
            relative_path: entry.relative_path,
            content_hash,
            size_bytes: entry.size_bytes,
        });
    }
    let manifest = Manifest::new(records)?;

    // Step 3: commit the manifest's digest sequence to a single root.
    let root = merkle::build_root(&manifest.digests())?;
    debug!(merkle_root = %root, "Merkle root computed");

    let record = CommitmentRecord {
        schema_version: SCHEMA_VERSION,
        merkle_root: root.clone(),
        generated_at: Utc::now(),
        target_path: target.to_string_lossy().into_owned(),
        file_count: manifest.len() as u64,
        total_size_bytes: manifest.total_size_bytes(),
        platform: std::env::consts::OS.to_string(),
    };

    // Step 4: persist. All computation succeeded; overwrite artifacts.
    let paths = ArtifactPaths::resolve(&target, output_dir, &config.metadata_dir);
    std::fs::create_dir_all(&paths.dir).map_err(|e| AuditError::io(&paths.dir, e))?;
    manifest.write(&paths.manifest)?;
    write_root(&paths.root, &root)?;
    write_commitment(&paths.commitment, &record)?;

    info!(
        file_count = record.file_count,
        total_size_bytes = record.total_size_bytes,
        merkle_root = %record.merkle_root,
        duration_ms = start.elapsed().as_millis(),
        "Audit completed"
    );

    Ok(record)
}

/// Write the standalone root artifact: one line of 64 lowercase hex.
fn write_root(path: &Path, root: &str) -> Result<(), AuditError> {
    std::fs::write(path, format!("{}\n", root)).map_err(|e| AuditError::io(path, e))
}

/// Read the standalone root artifact, trimming surrounding whitespace.
pub fn read_root(path: &Path) -> Result<String, AuditError> {
    let text = std::fs::read_to_string(path).map_err(|e| AuditError::io(path, e))?;
    Ok(text.trim().to_string())
}

fn write_commitment(path: &Path, record: &CommitmentRecord) -> Result<(), AuditError> {
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| AuditError::Config(format!("failed to serialize commitment: {}", e)))?;
    std::fs::write(path, json).map_err(|e| AuditError::io(path, e))
}

/// Load a persisted commitment record.
pub fn read_commitment(path: &Path) -> Result<CommitmentRecord, AuditError> {
    let text = std::fs::read_to_string(path).map_err(|e| AuditError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| AuditError::ManifestFormat {
        row: 0,
        message: format!("invalid commitment record {:?}: {}", path, e),
    })
}
