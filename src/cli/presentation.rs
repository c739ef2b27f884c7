//! CLI presentation: renders the core's structured results as text,
//! tables, or JSON. Rendering only flows from structured data, never
//! the reverse.

use crate::audit::CommitmentRecord;
use crate::discover::DiscoveredAudit;
use crate::error::AuditError;
use crate::report::AuditView;
use crate::verify::{CheckStatus, FileState, VerificationResult};
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Render the outcome of an audit run.
pub fn render_commitment(record: &CommitmentRecord) -> String {
    format!(
        "Audit complete\n  Files:       {}\n  Total size:  {} bytes\n  Merkle root: {}\n  Generated:   {}\n  Target:      {}\n\nVerify later with:\n  treeseal verify {:?}",
        record.file_count,
        record.total_size_bytes,
        record.merkle_root,
        record.generated_at.to_rfc3339(),
        record.target_path,
        record.target_path,
    )
}

/// Render a verification result as colored console lines or JSON.
pub fn render_verification(result: &VerificationResult, format: &str) -> Result<String, AuditError> {
    if format == "json" {
        return serde_json::to_string_pretty(result)
            .map_err(|e| AuditError::Config(format!("failed to render result: {}", e)));
    }

    let mut lines = Vec::new();
    for check in &result.checks {
        let status = match check.status {
            CheckStatus::Ok => format!("{}", "OK".green()),
            CheckStatus::Fail => format!("{}", "FAIL".red()),
            CheckStatus::Warn => format!("{}", "WARN".yellow()),
        };
        lines.push(format!("  [{}] {}: {}", status, check.name, check.detail));
    }

    for file in &result.files {
        match &file.state {
            FileState::Ok => {}
            FileState::Modified { expected, actual } => {
                lines.push(format!(
                    "  {} {}\n        expected {}\n        actual   {}",
                    "MODIFIED".red(),
                    file.relative_path,
                    expected,
                    actual
                ));
            }
            FileState::Missing => {
                lines.push(format!("  {}  {}", "MISSING".red(), file.relative_path));
            }
        }
    }

    lines.push(String::new());
    if result.passed {
        lines.push(format!("{}", "VERIFICATION PASSED".green().bold()));
    } else {
        lines.push(format!("{}", "VERIFICATION FAILED".red().bold()));
    }

    Ok(lines.join("\n"))
}

/// Render the stored audit view as a table or JSON.
pub fn render_report(view: &AuditView, format: &str) -> Result<String, AuditError> {
    if format == "json" {
        return serde_json::to_string_pretty(view)
            .map_err(|e| AuditError::Config(format!("failed to render report: {}", e)));
    }

    let mut table = Table::new();
    table.set_header(["File", "SHA-256", "Size (bytes)"]);
    for record in &view.records {
        table.add_row([
            record.relative_path.clone(),
            record.content_hash.clone(),
            record.size_bytes.to_string(),
        ]);
    }

    Ok(format!(
        "Audit of {}\n  Generated:   {}\n  Platform:    {}\n  Merkle root: {}\n\n{}",
        view.commitment.target_path,
        view.commitment.generated_at.to_rfc3339(),
        view.commitment.platform,
        view.commitment.merkle_root,
        table
    ))
}

/// Render discovered audits as a table or JSON.
pub fn render_discovered(
    audits: &[DiscoveredAudit],
    format: &str,
) -> Result<String, AuditError> {
    if format == "json" {
        let rows: Vec<serde_json::Value> = audits
            .iter()
            .map(|a| {
                serde_json::json!({
                    "target": a.target,
                    "output_dir": a.output_dir,
                    "commitment": a.commitment,
                })
            })
            .collect();
        return serde_json::to_string_pretty(&rows)
            .map_err(|e| AuditError::Config(format!("failed to render audits: {}", e)));
    }

    if audits.is_empty() {
        return Ok("No audits found.".to_string());
    }

    let mut table = Table::new();
    table.set_header(["Target", "Files", "Generated", "Merkle root"]);
    for a in audits {
        table.add_row([
            a.target.display().to_string(),
            a.commitment.file_count.to_string(),
            a.commitment.generated_at.to_rfc3339(),
            a.commitment.merkle_root.clone(),
        ]);
    }
    Ok(table.to_string())
}
