//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::AuditError;

/// Map domain errors to a string for CLI output.
///
/// Missing-artifact errors get a hint about the audit command; all
/// other errors render their Display form.
pub fn map_error(e: &AuditError) -> String {
    match e {
        AuditError::MissingArtifacts(names) => format!(
            "No complete audit found: missing {}.\nRun `treeseal audit <target>` before verifying.",
            names.join(", ")
        ),
        other => other.to_string(),
    }
}
