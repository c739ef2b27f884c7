//! Shared test utilities for integration tests

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a target directory with a small, nested file tree.
///
/// Layout:
/// ```text
/// root/
///   alpha.txt
///   beta.bin
///   docs/
///     notes.md
///   src/
///     main.rs
/// ```
pub fn seeded_tree() -> TempDir {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();

    fs::write(root.join("alpha.txt"), "alpha content").unwrap();
    fs::write(root.join("beta.bin"), [0u8, 1, 2, 3, 255]).unwrap();
    fs::create_dir(root.join("docs")).unwrap();
    fs::write(root.join("docs").join("notes.md"), "# notes\n").unwrap();
    fs::create_dir(root.join("src")).unwrap();
    fs::write(root.join("src").join("main.rs"), "fn main() {}\n").unwrap();

    temp_dir
}

/// Number of files `seeded_tree` creates.
pub const SEEDED_FILE_COUNT: u64 = 4;

/// Path to an artifact inside the default metadata directory.
pub fn artifact(root: &Path, name: &str) -> std::path::PathBuf {
    root.join(".treeseal").join(name)
}
