//! End-to-end audit pipeline behavior

use super::test_utils::{artifact, seeded_tree, SEEDED_FILE_COUNT};
use std::fs;
use treeseal::audit::{audit, read_root, SCHEMA_VERSION};
use treeseal::config::SealConfig;
use treeseal::error::AuditError;
use treeseal::verify::{verify, CheckStatus};

#[test]
fn audit_then_verify_unmodified_tree_passes() {
    let temp_dir = seeded_tree();
    let root = temp_dir.path();
    let config = SealConfig::default();

    let record = audit(root, None, &config).unwrap();
    assert_eq!(record.file_count, SEEDED_FILE_COUNT);
    assert_eq!(record.schema_version, SCHEMA_VERSION);

    let result = verify(root, None, &config).unwrap();
    assert!(result.passed);
    assert!(result
        .checks
        .iter()
        .all(|c| c.status == CheckStatus::Ok));
}

#[test]
fn repeated_audits_of_unchanged_tree_are_byte_identical() {
    let temp_dir = seeded_tree();
    let root = temp_dir.path();
    let config = SealConfig::default();

    audit(root, None, &config).unwrap();
    let first_manifest = fs::read(artifact(root, "manifest.csv")).unwrap();
    let first_root = read_root(&artifact(root, "merkle_root.txt")).unwrap();

    audit(root, None, &config).unwrap();
    let second_manifest = fs::read(artifact(root, "manifest.csv")).unwrap();
    let second_root = read_root(&artifact(root, "merkle_root.txt")).unwrap();

    assert_eq!(first_manifest, second_manifest);
    assert_eq!(first_root, second_root);
}

#[test]
fn audit_aborts_on_empty_target_without_writing() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let root = temp_dir.path();

    let err = audit(root, None, &SealConfig::default()).unwrap_err();
    assert!(matches!(err, AuditError::EmptyInput(_)));
    assert!(!root.join(".treeseal").exists());
}

#[test]
fn audit_failure_preserves_prior_state() {
    let temp_dir = seeded_tree();
    let root = temp_dir.path();
    let config = SealConfig::default();

    let record = audit(root, None, &config).unwrap();

    // Empty the tree; the re-audit fails and the stored artifacts
    // must still describe the last good run.
    for name in ["alpha.txt", "beta.bin"] {
        fs::remove_file(root.join(name)).unwrap();
    }
    fs::remove_file(root.join("docs").join("notes.md")).unwrap();
    fs::remove_file(root.join("src").join("main.rs")).unwrap();

    let err = audit(root, None, &config).unwrap_err();
    assert!(matches!(err, AuditError::EmptyInput(_)));

    let stored = read_root(&artifact(root, "merkle_root.txt")).unwrap();
    assert_eq!(stored, record.merkle_root);
}

#[test]
fn audit_respects_configured_exclusions() {
    let temp_dir = seeded_tree();
    let root = temp_dir.path();
    fs::create_dir(root.join("cache")).unwrap();
    fs::write(root.join("cache").join("blob"), "transient").unwrap();

    let mut config = SealConfig::default();
    config.scan.exclude.push("cache".to_string());

    let record = audit(root, None, &config).unwrap();
    assert_eq!(record.file_count, SEEDED_FILE_COUNT);

    // And verify with the same config sees no unmanifested files
    let result = verify(root, None, &config).unwrap();
    assert!(result.passed);
    assert_eq!(result.checks[3].status, CheckStatus::Ok);
}

#[test]
fn content_change_changes_root() {
    let temp_dir = seeded_tree();
    let root = temp_dir.path();
    let config = SealConfig::default();

    let first = audit(root, None, &config).unwrap();
    fs::write(root.join("alpha.txt"), "alpha content!").unwrap();
    let second = audit(root, None, &config).unwrap();

    assert_ne!(first.merkle_root, second.merkle_root);
}
