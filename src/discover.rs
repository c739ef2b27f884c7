//! Discovery of prior audits under explicit search roots
//!
//! Search roots are configuration passed in by the caller; there are no
//! built-in default locations.

use crate::audit::{read_commitment, CommitmentRecord, COMMITMENT_FILE};
use crate::config::SealConfig;
use crate::error::AuditError;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// A prior audit found under a search root.
#[derive(Debug, Clone)]
pub struct DiscoveredAudit {
    /// The audited directory (parent of the metadata directory).
    pub target: PathBuf,
    /// The metadata directory holding the artifacts.
    pub output_dir: PathBuf,
    /// The parsed commitment record.
    pub commitment: CommitmentRecord,
}

/// Walk each search root looking for metadata directories containing a
/// parseable commitment record.
///
/// Unreadable or malformed candidates are skipped with a warning;
/// results are sorted by target path. A nonexistent search root is not
/// an error, it simply yields nothing.
pub fn discover(
    search_roots: &[PathBuf],
    config: &SealConfig,
) -> Result<Vec<DiscoveredAudit>, AuditError> {
    let mut found = Vec::new();

    for root in search_roots {
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_dir()
                || entry.file_name() != std::ffi::OsStr::new(&config.metadata_dir)
            {
                continue;
            }

            let output_dir = entry.path().to_path_buf();
            let commitment_path = output_dir.join(COMMITMENT_FILE);
            if !commitment_path.is_file() {
                continue;
            }

            match read_commitment(&commitment_path) {
                Ok(commitment) => {
                    let target = parent_of(&output_dir);
                    found.push(DiscoveredAudit {
                        target,
                        output_dir,
                        commitment,
                    });
                }
                Err(e) => {
                    warn!(path = %commitment_path.display(), error = %e, "Skipping malformed commitment");
                }
            }
        }
    }

    found.sort_by(|a, b| a.target.cmp(&b.target));
    Ok(found)
}

fn parent_of(output_dir: &Path) -> PathBuf {
    output_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output_dir.to_path_buf())
}
