//! Zip packaging of an assembled project.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::assemble::ExportReport;
use crate::error::{ExportError, Result};
use crate::workspace::{Deadline, ExportWorkspace};

/// Default deflate level.
pub const DEFAULT_COMPRESSION_LEVEL: i64 = 9;

/// Level at which entries are stored without compression.
pub const STORED_LEVEL: i64 = 0;

/// Writes a directory tree into a zip archive.
#[derive(Debug, Clone, Copy)]
pub struct Packager {
    level: i64,
    deadline: Deadline,
}

impl Packager {
    pub fn new(level: i64) -> Self {
        Self {
            level,
            deadline: Deadline::unlimited(),
        }
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Archive the contents of `root` into `archive_path`.
    ///
    /// Entry names are relative to `root`, `/`-separated, in sorted order.
    /// The archive is finished and synced to disk before this returns.
    /// Returns the number of entries written.
    pub fn package(&self, root: &Path, archive_path: &Path) -> Result<usize> {
        let file = File::create(archive_path).map_err(|e| ExportError::io(archive_path, e))?;
        let mut zip = ZipWriter::new(file);
        let options = self.file_options();

        let mut entries = 0usize;
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            self.deadline.check()?;
            let entry = entry?;
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let name = entry_name(relative);

            if entry.file_type().is_dir() {
                zip.add_directory(name, options)?;
            } else if entry.file_type().is_file() {
                zip.start_file(name, options)?;
                let mut source =
                    File::open(entry.path()).map_err(|e| ExportError::io(entry.path(), e))?;
                io::copy(&mut source, &mut zip).map_err(|e| ExportError::io(entry.path(), e))?;
            } else {
                continue;
            }
            entries += 1;
        }

        let file = zip.finish()?;
        file.sync_all().map_err(|e| ExportError::io(archive_path, e))?;
        debug!(archive = %archive_path.display(), entries, "archive finalized");
        Ok(entries)
    }

    fn file_options(&self) -> SimpleFileOptions {
        // Deflate has no level 0; zip rejects it instead of storing.
        if self.level == STORED_LEVEL {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(self.level))
        }
    }
}

impl Default for Packager {
    fn default() -> Self {
        Self::new(DEFAULT_COMPRESSION_LEVEL)
    }
}

/// Archive entry name of a relative path.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// A finished archive, ready to transmit.
///
/// Owns the export workspace: the project directory and the archive are
/// removed when this is dropped, whether or not it was transmitted.
#[derive(Debug)]
pub struct ExportedArchive {
    path: PathBuf,
    file_name: String,
    report: ExportReport,
    // Declared last so the workspace outlives every other field on drop.
    workspace: ExportWorkspace,
}

impl ExportedArchive {
    pub fn new(
        path: PathBuf,
        file_name: impl Into<String>,
        report: ExportReport,
        workspace: ExportWorkspace,
    ) -> Self {
        Self {
            path,
            file_name: file_name.into(),
            report,
            workspace,
        }
    }

    /// Path of the archive inside the workspace.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Download name of the archive.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn report(&self) -> &ExportReport {
        &self.report
    }

    pub fn workspace(&self) -> &Path {
        self.workspace.path()
    }

    /// Size of the archive in bytes.
    pub fn len(&self) -> Result<u64> {
        fs::metadata(&self.path)
            .map(|meta| meta.len())
            .map_err(|e| ExportError::io(&self.path, e))
    }

    /// Stream the archive to `writer`, then remove the workspace.
    ///
    /// Returns the number of bytes written.
    pub fn stream_to<W: Write + ?Sized>(self, writer: &mut W) -> Result<u64> {
        let mut file = File::open(&self.path).map_err(|e| ExportError::io(&self.path, e))?;
        let written = io::copy(&mut file, writer).map_err(ExportError::Transmission)?;
        writer.flush().map_err(ExportError::Transmission)?;
        debug!(archive = %self.file_name, bytes = written, "archive transmitted");
        Ok(written)
    }

    /// Read the archive into memory, then remove the workspace.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| ExportError::io(&self.path, e))
    }
}
