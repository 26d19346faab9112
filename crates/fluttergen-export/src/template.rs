//! Project skeletons.

use std::fs;
use std::path::{Path, PathBuf};

use fluttergen_codegen::FlutterGenerator;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ExportError, Result};

/// Source of the files every generated project starts from.
pub trait TemplateProvider: Send + Sync {
    /// Write the skeleton into `dest`, creating it if needed.
    fn materialize(&self, dest: &Path) -> Result<()>;
}

/// A skeleton copied from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryTemplate {
    root: PathBuf,
}

impl DirectoryTemplate {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateProvider for DirectoryTemplate {
    fn materialize(&self, dest: &Path) -> Result<()> {
        if !self.root.is_dir() {
            return Err(ExportError::TemplateNotFound(self.root.clone()));
        }
        fs::create_dir_all(dest).map_err(|e| ExportError::io(dest, e))?;

        let mut copied = 0usize;
        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let target = dest.join(relative);
            let file_type = entry.file_type();

            if file_type.is_dir() {
                fs::create_dir_all(&target).map_err(|e| ExportError::io(&target, e))?;
            } else if file_type.is_file() {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
                }
                fs::copy(entry.path(), &target).map_err(|e| ExportError::io(entry.path(), e))?;
                copied += 1;
            } else {
                debug!(path = %entry.path().display(), "skipping non-regular template entry");
            }
        }

        debug!(template = %self.root.display(), files = copied, "copied project template");
        Ok(())
    }
}

/// The embedded minimal skeleton: package manifest, lints, ignore file and
/// readme. Platform folders come from `flutter create .`.
#[derive(Debug, Clone)]
pub struct BuiltinTemplate {
    title: String,
}

impl BuiltinTemplate {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

impl TemplateProvider for BuiltinTemplate {
    fn materialize(&self, dest: &Path) -> Result<()> {
        let files = FlutterGenerator::with_title(&self.title)?.generate_skeleton()?;
        for file in &files {
            let target = dest.join(&file.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
            }
            fs::write(&target, &file.content).map_err(|e| ExportError::io(&target, e))?;
        }
        debug!(files = files.len(), "wrote builtin project template");
        Ok(())
    }
}
