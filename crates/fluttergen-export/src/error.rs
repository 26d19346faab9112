//! Error types for fluttergen-export.

use std::path::{Path, PathBuf};
use std::time::Duration;

use fluttergen_codegen::CodegenError;
use fluttergen_core::ParseError;
use thiserror::Error;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while assembling or packaging a project.
///
/// These carry full detail for logs. Callers of [`crate::Exporter`] only ever
/// see [`ExportFailure`].
#[derive(Debug, Error)]
pub enum ExportError {
    /// The request body is not a label to document mapping.
    #[error("invalid export request: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    /// The configuration file could not be parsed.
    #[error("invalid export config: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    #[error("compression level {0} is out of range 0-9")]
    InvalidCompressionLevel(i64),

    #[error("invalid archive name '{0}'")]
    InvalidArchiveName(String),

    /// A screen document failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Dart source generation failed.
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("template directory not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Filesystem error on a known path.
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error while walking a directory tree.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Writing the archive to its consumer failed.
    #[error("transmission failed: {0}")]
    Transmission(#[source] std::io::Error),

    #[error("export exceeded its {0:?} time limit")]
    TimedOut(Duration),
}

impl ExportError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The only failure surfaced by the export pipeline.
///
/// Internal details are logged, never exposed to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("export could not be completed")]
pub struct ExportFailure;
