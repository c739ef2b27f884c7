//! Directory scanner producing deterministic file enumerations

use crate::error::AuditError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A regular file found under the scan root, prior to hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative_path: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory names excluded from scans wherever they appear as a
    /// path component. Always contains the reserved metadata directory
    /// name so the tool never audits its own output.
    pub exclude_names: Vec<String>,
    /// Whether to follow symbolic links (default: false for determinism)
    pub follow_symlinks: bool,
}

impl ScanConfig {
    /// Config excluding the given reserved metadata directory name.
    pub fn new(metadata_dir: &str) -> Self {
        Self {
            exclude_names: vec![metadata_dir.to_string()],
            follow_symlinks: false,
        }
    }

    /// Add extra directory names to exclude.
    pub fn with_excludes(mut self, names: &[String]) -> Self {
        self.exclude_names.extend(names.iter().cloned());
        self
    }
}

/// Filesystem scanner
pub struct Scanner {
    root: PathBuf,
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner for the given root with the given config.
    pub fn new(root: PathBuf, config: ScanConfig) -> Self {
        Self { root, config }
    }

    /// Enumerate regular files under the root.
    ///
    /// Returns entries in full-path lexical order, independent of
    /// filesystem iteration order. Fails if the root does not exist or
    /// is not a directory.
    pub fn scan(&self) -> Result<Vec<ScannedFile>, AuditError> {
        if !self.root.is_dir() {
            return Err(AuditError::TargetNotFound(self.root.clone()));
        }

        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                AuditError::io(
                    path,
                    e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::new(std::io::ErrorKind::Other, "walk failed")
                    }),
                )
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path().to_path_buf();
            let metadata = entry.metadata().map_err(|e| {
                AuditError::io(
                    &path,
                    e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::new(std::io::ErrorKind::Other, "metadata failed")
                    }),
                )
            })?;

            let relative_path = path
                .strip_prefix(&self.root)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned();

            entries.push(ScannedFile {
                path,
                relative_path,
                size_bytes: metadata.len(),
            });
        }

        // Full-path lexical sort for a reproducible leaf order
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(entries)
    }

    /// Check whether an entry sits under an excluded directory name.
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let path = entry.path();
        for component in path.components() {
            if let std::path::Component::Normal(name) = component {
                let name = name.to_string_lossy();
                if self
                    .config
                    .exclude_names
                    .iter()
                    .any(|pattern| name == pattern.as_str())
                {
                    return true;
                }
            }
        }
        false
    }
}

/// Canonicalize a directory path for use as a scan root.
///
/// Resolves symlinks, `.` and `..`; uses dunce so Windows paths stay in
/// their non-UNC form. Fails if the path does not exist or is not a
/// directory.
pub fn canonical_root(path: &Path) -> Result<PathBuf, AuditError> {
    let canonical =
        dunce::canonicalize(path).map_err(|_| AuditError::TargetNotFound(path.to_path_buf()))?;
    if !canonical.is_dir() {
        return Err(AuditError::TargetNotFound(path.to_path_buf()));
    }
    Ok(canonical)
}
