//! Export configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// What to do with a screen whose document cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenIsolation {
    /// Fail the whole export.
    #[default]
    AbortAll,
    /// Leave the screen out and report it.
    SkipInvalid,
}

/// Settings for one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// App title; also the source of the pub package name.
    pub project_name: String,
    /// Download name of the produced archive.
    pub archive_name: String,
    /// Directory under which per-export workspaces are created. Defaults to
    /// the system temporary directory.
    pub work_root: Option<PathBuf>,
    /// Deflate level, 1-9; 0 stores entries uncompressed.
    pub compression_level: i64,
    pub isolation: ScreenIsolation,
    /// Wall-clock limit for assembling and packaging.
    pub timeout_secs: Option<u64>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            project_name: "flutter_project".to_string(),
            archive_name: "flutter_project.zip".to_string(),
            work_root: None,
            compression_level: 9,
            isolation: ScreenIsolation::AbortAll,
            timeout_secs: None,
        }
    }
}

impl ExportConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(ExportError::InvalidConfig)
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        Self::from_json(&source)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if !(0..=9).contains(&self.compression_level) {
            return Err(ExportError::InvalidCompressionLevel(self.compression_level));
        }
        let name = self.archive_name.as_str();
        if name.trim().is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
        {
            return Err(ExportError::InvalidArchiveName(self.archive_name.clone()));
        }
        Ok(())
    }

    pub fn work_root(&self) -> PathBuf {
        self.work_root.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
