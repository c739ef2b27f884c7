//! Configuration System
//!
//! Explicit configuration for the audit pipeline: reserved metadata
//! directory name, extra scan exclusions, discovery search roots, and
//! logging settings. Loaded from a TOML file next to the target or a
//! caller-supplied path; every field has a default so a missing file is
//! not an error.

use crate::error::AuditError;
use crate::logging::LoggingConfig;
use crate::scan::ScanConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default name of the reserved metadata directory where audit
/// artifacts are persisted. Always excluded from scans.
pub const DEFAULT_METADATA_DIR: &str = ".treeseal";

/// Name of the configuration file looked up inside the target.
pub const CONFIG_FILE_NAME: &str = "treeseal.toml";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealConfig {
    /// Reserved metadata directory name (default `.treeseal`)
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: String,

    /// Scanner settings
    #[serde(default)]
    pub scan: ScanSettings,

    /// Audit discovery settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_metadata_dir() -> String {
    DEFAULT_METADATA_DIR.to_string()
}

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            metadata_dir: default_metadata_dir(),
            scan: ScanSettings::default(),
            discovery: DiscoveryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Scanner settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Extra directory names to exclude from scans, in addition to the
    /// reserved metadata directory
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Audit discovery settings.
///
/// Search roots are explicit configuration; the discovery operation has
/// no built-in default locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Directories to search for prior audits
    #[serde(default)]
    pub search_roots: Vec<PathBuf>,
}

impl SealConfig {
    /// Load configuration for a target directory.
    ///
    /// Reads `<target>/treeseal.toml` if present; otherwise returns
    /// defaults. An unreadable or invalid file is a hard error, not a
    /// silent fallback.
    pub fn load(target: &Path) -> Result<Self, AuditError> {
        let path = target.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file path.
    pub fn load_from_file(path: &Path) -> Result<Self, AuditError> {
        let text = std::fs::read_to_string(path).map_err(|e| AuditError::io(path, e))?;
        let config: SealConfig = toml::from_str(&text)
            .map_err(|e| AuditError::Config(format!("invalid config {:?}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.metadata_dir.is_empty() {
            return Err(AuditError::Config(
                "metadata_dir cannot be empty".to_string(),
            ));
        }
        if self.metadata_dir.contains(std::path::MAIN_SEPARATOR) || self.metadata_dir.contains('/')
        {
            return Err(AuditError::Config(format!(
                "metadata_dir must be a single directory name, got {:?}",
                self.metadata_dir
            )));
        }
        Ok(())
    }

    /// Scanner configuration derived from these settings: the reserved
    /// metadata directory plus any extra exclusions.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new(&self.metadata_dir).with_excludes(&self.scan.exclude)
    }
}
