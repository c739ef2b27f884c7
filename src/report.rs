//! Read-only view over persisted audit state
//!
//! The core never renders text; it exposes the ordered record sequence
//! plus the commitment record, and adapters format that view however
//! they like.

use crate::audit::{read_commitment, ArtifactPaths, CommitmentRecord};
use crate::config::SealConfig;
use crate::error::AuditError;
use crate::manifest::{FileRecord, Manifest};
use crate::scan::canonical_root;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persisted audit state, loaded wholesale for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditView {
    /// File records in audit order.
    pub records: Vec<FileRecord>,
    /// The commitment record of the audit run.
    pub commitment: CommitmentRecord,
}

/// Load the audit view for a target.
///
/// Fails with [`AuditError::MissingArtifacts`] when no complete audit
/// exists at the resolved location.
pub fn load_view(
    target: &Path,
    output_dir: Option<&Path>,
    config: &SealConfig,
) -> Result<AuditView, AuditError> {
    let target = canonical_root(target)?;
    let paths = ArtifactPaths::resolve(&target, output_dir, &config.metadata_dir);

    let missing = paths.missing();
    if !missing.is_empty() {
        return Err(AuditError::MissingArtifacts(missing));
    }

    let manifest = Manifest::read(&paths.manifest)?;
    let commitment = read_commitment(&paths.commitment)?;

    Ok(AuditView {
        records: manifest.records().to_vec(),
        commitment,
    })
}
