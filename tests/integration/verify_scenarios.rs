//! Tamper-detection scenarios for the verification engine

use super::test_utils::{artifact, seeded_tree};
use std::fs;
use treeseal::audit::audit;
use treeseal::config::SealConfig;
use treeseal::error::AuditError;
use treeseal::verify::{verify, CheckStatus, FileState};

#[test]
fn single_byte_mutation_flags_exactly_one_file() {
    let temp_dir = seeded_tree();
    let root = temp_dir.path();
    let config = SealConfig::default();
    audit(root, None, &config).unwrap();

    // Flip one byte
    let mut bytes = fs::read(root.join("beta.bin")).unwrap();
    bytes[2] ^= 0x01;
    fs::write(root.join("beta.bin"), bytes).unwrap();

    let result = verify(root, None, &config).unwrap();
    assert!(!result.passed);

    let modified: Vec<_> = result
        .files
        .iter()
        .filter(|f| matches!(f.state, FileState::Modified { .. }))
        .collect();
    assert_eq!(modified.len(), 1);
    assert_eq!(modified[0].relative_path, "beta.bin");
    assert_eq!(
        result
            .files
            .iter()
            .filter(|f| f.state == FileState::Ok)
            .count(),
        3
    );
}

#[test]
fn deleted_file_reported_missing_and_fails() {
    let temp_dir = seeded_tree();
    let root = temp_dir.path();
    let config = SealConfig::default();
    audit(root, None, &config).unwrap();

    fs::remove_file(root.join("docs").join("notes.md")).unwrap();

    let result = verify(root, None, &config).unwrap();
    assert!(!result.passed);
    assert!(result
        .files
        .iter()
        .any(|f| f.state == FileState::Missing && f.relative_path == "docs/notes.md"));
}

#[test]
fn added_file_warns_without_failing() {
    let temp_dir = seeded_tree();
    let root = temp_dir.path();
    let config = SealConfig::default();
    audit(root, None, &config).unwrap();

    fs::write(root.join("docs").join("planted.md"), "unauthorized").unwrap();

    let result = verify(root, None, &config).unwrap();
    assert!(result.passed, "additions alone must not fail verification");

    let warn: Vec<_> = result
        .checks
        .iter()
        .filter(|c| c.status == CheckStatus::Warn)
        .collect();
    assert_eq!(warn.len(), 1);
    assert!(warn[0].detail.contains("planted.md"));
}

#[test]
fn verify_without_audit_names_all_artifacts() {
    let temp_dir = seeded_tree();
    let root = temp_dir.path();

    let err = verify(root, None, &SealConfig::default()).unwrap_err();
    match err {
        AuditError::MissingArtifacts(names) => {
            assert_eq!(
                names,
                vec!["manifest.csv", "merkle_root.txt", "commitment.json"]
            );
        }
        other => panic!("expected MissingArtifacts, got {:?}", other),
    }
}

#[test]
fn tampered_commitment_fails_consistency_only() {
    let temp_dir = seeded_tree();
    let root = temp_dir.path();
    let config = SealConfig::default();
    audit(root, None, &config).unwrap();

    // Rewrite the embedded root; the standalone root and manifest
    // still agree with each other.
    let commitment_path = artifact(root, "commitment.json");
    let text = fs::read_to_string(&commitment_path).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
    value["merkle_root"] = serde_json::Value::String("f".repeat(64));
    fs::write(&commitment_path, serde_json::to_string_pretty(&value).unwrap()).unwrap();

    let result = verify(root, None, &config).unwrap();
    assert!(!result.passed);
    assert_eq!(result.checks[0].status, CheckStatus::Fail);
    assert_eq!(result.checks[1].status, CheckStatus::Ok);
    assert_eq!(result.checks[2].status, CheckStatus::Ok);
}

#[test]
fn combined_tampering_reports_every_discrepancy_in_one_pass() {
    let temp_dir = seeded_tree();
    let root = temp_dir.path();
    let config = SealConfig::default();
    audit(root, None, &config).unwrap();

    fs::write(root.join("alpha.txt"), "rewritten").unwrap();
    fs::remove_file(root.join("src").join("main.rs")).unwrap();
    fs::write(root.join("sneaky.txt"), "added later").unwrap();

    let result = verify(root, None, &config).unwrap();
    assert!(!result.passed);
    // One modified, one missing, two still fine
    assert_eq!(
        result
            .files
            .iter()
            .filter(|f| matches!(f.state, FileState::Modified { .. }))
            .count(),
        1
    );
    assert_eq!(
        result
            .files
            .iter()
            .filter(|f| f.state == FileState::Missing)
            .count(),
        1
    );
    assert_eq!(result.checks[3].status, CheckStatus::Warn);
    assert!(result.checks[3].detail.contains("sneaky.txt"));
}

#[test]
fn verify_with_custom_output_dir() {
    let temp_dir = seeded_tree();
    let out_dir = tempfile::TempDir::new().unwrap();
    let root = temp_dir.path();
    let out = out_dir.path().join("state");
    let config = SealConfig::default();

    audit(root, Some(&out), &config).unwrap();
    let result = verify(root, Some(&out), &config).unwrap();
    assert!(result.passed);
}
