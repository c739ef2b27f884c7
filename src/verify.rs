//! Verification engine: reload persisted state, recompute, compare
//!
//! Runs four independent checks over a prior audit. Content-integrity
//! mismatches never abort the pass; every discrepancy is collected into
//! a structured result that adapters render. Only missing artifacts
//! abort early.

use crate::audit::{read_commitment, read_root, ArtifactPaths};
use crate::config::SealConfig;
use crate::digest;
use crate::error::AuditError;
use crate::manifest::Manifest;
use crate::merkle;
use crate::scan::{canonical_root, Scanner};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Outcome of a single verification check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Ok,
    Fail,
    Warn,
}

/// One entry in the ordered check sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

/// Per-file verdict from the file-integrity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "UPPERCASE")]
pub enum FileState {
    Ok,
    Modified { expected: String, actual: String },
    Missing,
}

/// Verdict for one manifested file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub relative_path: String,
    #[serde(flatten)]
    pub state: FileState,
}

/// Structured verification outcome.
///
/// `passed` is the logical AND of the commitment-consistency check, the
/// root-recomputation check, and "every file record is OK". The
/// unmanifested-files check is advisory and never affects `passed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub checks: Vec<Check>,
    pub files: Vec<FileReport>,
}

const CHECK_CONSISTENCY: &str = "commitment-consistency";
const CHECK_RECOMPUTATION: &str = "root-recomputation";
const CHECK_FILES: &str = "file-integrity";
const CHECK_UNMANIFESTED: &str = "unmanifested-files";

/// Verify `target` against its persisted audit state.
///
/// Preconditions: `manifest.csv`, `merkle_root.txt`, and
/// `commitment.json` must all exist; otherwise fails with
/// [`AuditError::MissingArtifacts`] naming every absent artifact and no
/// checks run. The four checks never short-circuit each other.
#[instrument(skip(config), fields(target = %target.display()))]
pub fn verify(
    target: &Path,
    output_dir: Option<&Path>,
    config: &SealConfig,
) -> Result<VerificationResult, AuditError> {
    let target = canonical_root(target)?;
    let paths = ArtifactPaths::resolve(&target, output_dir, &config.metadata_dir);

    let missing = paths.missing();
    if !missing.is_empty() {
        return Err(AuditError::MissingArtifacts(missing));
    }

    let manifest = Manifest::read(&paths.manifest)?;
    let stored_root = read_root(&paths.root)?;
    let commitment = read_commitment(&paths.commitment)?;
    info!(file_count = manifest.len(), "Verifying against stored audit");

    let mut checks = Vec::with_capacity(4);

    // Check A: the two persisted root copies agree.
    checks.push(check_consistency(&commitment.merkle_root, &stored_root));

    // Check B: the stored manifest still commits to the stored root.
    checks.push(check_recomputation(&manifest, &stored_root)?);

    // Check C: every manifested file, re-statted and re-hashed.
    let (file_check, files) = check_files(&manifest)?;
    checks.push(file_check);

    // Check D: files on disk that no audit recorded. Advisory only.
    checks.push(check_unmanifested(&target, &manifest, config)?);

    let passed = checks[0].status == CheckStatus::Ok
        && checks[1].status == CheckStatus::Ok
        && checks[2].status == CheckStatus::Ok;

    info!(passed, "Verification completed");
    Ok(VerificationResult {
        passed,
        checks,
        files,
    })
}

fn check_consistency(embedded_root: &str, stored_root: &str) -> Check {
    if embedded_root == stored_root {
        Check {
            name: CHECK_CONSISTENCY.to_string(),
            status: CheckStatus::Ok,
            detail: "commitment record matches standalone root".to_string(),
        }
    } else {
        Check {
            name: CHECK_CONSISTENCY.to_string(),
            status: CheckStatus::Fail,
            detail: format!(
                "commitment record root {} does not match standalone root {}",
                embedded_root, stored_root
            ),
        }
    }
}

fn check_recomputation(manifest: &Manifest, stored_root: &str) -> Result<Check, AuditError> {
    if manifest.is_empty() {
        // An audit never writes an empty manifest; this is tampering.
        return Ok(Check {
            name: CHECK_RECOMPUTATION.to_string(),
            status: CheckStatus::Fail,
            detail: "manifest contains no rows".to_string(),
        });
    }

    let recomputed = merkle::build_root(&manifest.digests())?;
    debug!(recomputed = %recomputed, stored = %stored_root, "Recomputed Merkle root");

    if recomputed == stored_root {
        Ok(Check {
            name: CHECK_RECOMPUTATION.to_string(),
            status: CheckStatus::Ok,
            detail: "recomputed root matches standalone root".to_string(),
        })
    } else {
        Ok(Check {
            name: CHECK_RECOMPUTATION.to_string(),
            status: CheckStatus::Fail,
            detail: format!(
                "recomputed root {} does not match standalone root {}; manifest may have been edited",
                recomputed, stored_root
            ),
        })
    }
}

fn check_files(manifest: &Manifest) -> Result<(Check, Vec<FileReport>), AuditError> {
    let mut files = Vec::with_capacity(manifest.len());
    let mut modified = 0usize;
    let mut missing = 0usize;

    // Every record is checked; no early exit on failure.
    for record in manifest.records() {
        let state = if !record.path.is_file() {
            missing += 1;
            FileState::Missing
        } else {
            let actual = digest::hash_file(&record.path)?;
            if actual == record.content_hash {
                FileState::Ok
            } else {
                modified += 1;
                FileState::Modified {
                    expected: record.content_hash.clone(),
                    actual,
                }
            }
        };
        files.push(FileReport {
            relative_path: record.relative_path.clone(),
            state,
        });
    }

    let check = if modified == 0 && missing == 0 {
        Check {
            name: CHECK_FILES.to_string(),
            status: CheckStatus::Ok,
            detail: format!("all {} files verified", manifest.len()),
        }
    } else {
        Check {
            name: CHECK_FILES.to_string(),
            status: CheckStatus::Fail,
            detail: format!(
                "{} modified, {} missing of {} files",
                modified,
                missing,
                manifest.len()
            ),
        }
    };

    Ok((check, files))
}

fn check_unmanifested(
    target: &Path,
    manifest: &Manifest,
    config: &SealConfig,
) -> Result<Check, AuditError> {
    let scanner = Scanner::new(target.to_path_buf(), config.scan_config());
    let on_disk = scanner.scan()?;

    let manifested: HashSet<&Path> = manifest.records().iter().map(|r| r.path.as_path()).collect();

    let extra: Vec<String> = on_disk
        .iter()
        .filter(|entry| !manifested.contains(entry.path.as_path()))
        .map(|entry| entry.relative_path.clone())
        .collect();

    if extra.is_empty() {
        Ok(Check {
            name: CHECK_UNMANIFESTED.to_string(),
            status: CheckStatus::Ok,
            detail: "no unmanifested files on disk".to_string(),
        })
    } else {
        let mut listed = extra.iter().take(5).cloned().collect::<Vec<_>>().join(", ");
        if extra.len() > 5 {
            listed.push_str(&format!(" (+{} more)", extra.len() - 5));
        }
        Ok(Check {
            name: CHECK_UNMANIFESTED.to_string(),
            status: CheckStatus::Warn,
            detail: format!("{} unmanifested file(s): {}", extra.len(), listed),
        })
    }
}
