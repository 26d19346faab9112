//! Per-export scratch directories and time limits.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::{ExportError, Result};

/// Prefix of every workspace directory.
pub const WORKSPACE_PREFIX: &str = "fluttergen-";

/// Name of the project directory inside a workspace.
const PROJECT_DIR: &str = "project";

/// Name of the archive file inside a workspace, independent of the download name.
const ARCHIVE_FILE: &str = "archive.zip";

/// A uniquely named directory owned by one export.
///
/// Holds the assembled project and the archive. The directory and everything
/// in it is removed when the workspace is dropped; removal failures are
/// logged.
#[derive(Debug)]
pub struct ExportWorkspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl ExportWorkspace {
    /// Create a fresh workspace under `root`, creating `root` if needed.
    pub fn create(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|e| ExportError::io(root, e))?;
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(root)
            .map_err(|e| ExportError::io(root, e))?;
        let path = dir.path().to_path_buf();
        debug!(workspace = %path.display(), "created export workspace");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the project is assembled.
    pub fn project_dir(&self) -> PathBuf {
        self.path.join(PROJECT_DIR)
    }

    /// Where the archive is written.
    pub fn archive_path(&self) -> PathBuf {
        self.path.join(ARCHIVE_FILE)
    }

    /// Remove the workspace now, reporting failure to the caller.
    pub fn close(mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) => dir.close().map_err(|e| ExportError::io(&self.path, e)),
            None => Ok(()),
        }
    }
}

impl Drop for ExportWorkspace {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        match dir.close() {
            Ok(()) => debug!(workspace = %self.path.display(), "removed export workspace"),
            Err(err) => warn!(
                workspace = %self.path.display(),
                error = %err,
                "failed to remove export workspace"
            ),
        }
    }
}

/// Wall-clock limit checked between units of work.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    /// Start the clock. `None` never expires.
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    pub fn check(&self) -> Result<()> {
        match self.limit {
            Some(limit) if self.started.elapsed() >= limit => Err(ExportError::TimedOut(limit)),
            _ => Ok(()),
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::unlimited()
    }
}
