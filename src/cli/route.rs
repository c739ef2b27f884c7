//! CLI route: dispatches parsed commands into the core and hands
//! structured results to presentation.

use crate::audit::{audit, ArtifactPaths};
use crate::cli::parse::Commands;
use crate::cli::presentation;
use crate::config::SealConfig;
use crate::discover::discover;
use crate::error::AuditError;
use crate::report::load_view;
use crate::scan::canonical_root;
use crate::verify::verify;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name of the rendered report written next to the artifacts
/// after a successful audit. Never read back by the core.
pub const REPORT_FILE: &str = "report.txt";

/// Result of executing one CLI command.
#[derive(Debug)]
pub struct RunOutcome {
    /// Rendered output for stdout.
    pub output: String,
    /// Whether the process should exit zero.
    pub success: bool,
}

impl RunOutcome {
    fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }
}

/// Runtime context for CLI execution: resolved configuration source.
pub struct RunContext {
    config_path: Option<PathBuf>,
}

impl RunContext {
    /// Create a run context with an optional explicit config file.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    /// Load configuration for a command operating on `target`.
    ///
    /// An explicit `--config` path wins; otherwise the target's own
    /// `treeseal.toml` (or defaults) applies.
    pub fn load_config(&self, target: Option<&Path>) -> Result<SealConfig, AuditError> {
        match (&self.config_path, target) {
            (Some(path), _) => SealConfig::load_from_file(path),
            (None, Some(target)) => SealConfig::load(target),
            (None, None) => Ok(SealConfig::default()),
        }
    }

    /// Execute a parsed command.
    pub fn execute(&self, command: &Commands) -> Result<RunOutcome, AuditError> {
        match command {
            Commands::Audit { target, output_dir } => {
                let config = self.load_config(Some(target))?;
                let record = audit(target, output_dir.as_deref(), &config)?;

                // Rendered report is an adapter artifact, not a
                // verification input; failing to write it is a warning.
                if let Err(e) = self.write_report(target, output_dir.as_deref(), &config) {
                    warn!(error = %e, "Failed to write rendered report");
                }

                Ok(RunOutcome::ok(presentation::render_commitment(&record)))
            }
            Commands::Verify {
                target,
                output_dir,
                format,
            } => {
                let config = self.load_config(Some(target))?;
                let result = verify(target, output_dir.as_deref(), &config)?;
                let output = presentation::render_verification(&result, format)?;
                Ok(RunOutcome {
                    output,
                    success: result.passed,
                })
            }
            Commands::Report {
                target,
                output_dir,
                format,
            } => {
                let config = self.load_config(Some(target))?;
                let view = load_view(target, output_dir.as_deref(), &config)?;
                Ok(RunOutcome::ok(presentation::render_report(&view, format)?))
            }
            Commands::Discover { roots, format } => {
                let config = self.load_config(None)?;
                let roots = if roots.is_empty() {
                    config.discovery.search_roots.clone()
                } else {
                    roots.clone()
                };
                if roots.is_empty() {
                    return Err(AuditError::Config(
                        "no search roots given and none configured".to_string(),
                    ));
                }
                let found = discover(&roots, &config)?;
                Ok(RunOutcome::ok(presentation::render_discovered(
                    &found, format,
                )?))
            }
        }
    }

    fn write_report(
        &self,
        target: &Path,
        output_dir: Option<&Path>,
        config: &SealConfig,
    ) -> Result<(), AuditError> {
        let view = load_view(target, output_dir, config)?;
        let rendered = presentation::render_report(&view, "text")?;
        let target = canonical_root(target)?;
        let paths = ArtifactPaths::resolve(&target, output_dir, &config.metadata_dir);
        let report_path = paths.dir.join(REPORT_FILE);
        std::fs::write(&report_path, rendered).map_err(|e| AuditError::io(report_path, e))
    }
}
