//! Project assembly: skeleton, screens and entry point on disk.

use std::fs;
use std::path::Path;

use fluttergen_codegen::{FlutterGenerator, RouteTable, ENTRY_POINT_PATH, SCREENS_DIR};
use fluttergen_core::Project;
use serde::Serialize;
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::template::TemplateProvider;
use crate::workspace::Deadline;

/// One generated screen file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenEntry {
    pub label: String,
    pub file_name: String,
    pub class_name: String,
    pub route_path: String,
}

/// A screen renamed to avoid a name collision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedScreen {
    pub label: String,
    pub from: String,
    pub to: String,
}

/// A screen left out because its document did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedScreen {
    pub label: String,
    pub reason: String,
}

/// Summary of a finished export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub screens: Vec<ScreenEntry>,
    pub home_class: String,
    pub renamed: Vec<RenamedScreen>,
    pub skipped: Vec<SkippedScreen>,
    /// Number of entries written to the archive.
    pub archive_entries: usize,
}

/// Writes a complete project into a directory.
pub struct ProjectAssembler<'a> {
    generator: FlutterGenerator<'a>,
    deadline: Deadline,
}

impl<'a> ProjectAssembler<'a> {
    pub fn new(title: &str) -> Result<Self> {
        Ok(Self {
            generator: FlutterGenerator::with_title(title)?,
            deadline: Deadline::unlimited(),
        })
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Materialize the skeleton into `dest`, then write one file per screen
    /// under `lib/screens` and the entry point at `lib/main.dart`.
    ///
    /// Screens are written in input order under the names resolved by
    /// `routes`. A `lib/main.dart` supplied by the skeleton is replaced.
    pub fn assemble(
        &self,
        project: &Project,
        routes: &RouteTable,
        template: &dyn TemplateProvider,
        dest: &Path,
    ) -> Result<ExportReport> {
        template.materialize(dest)?;

        let screens_dir = dest.join(SCREENS_DIR);
        fs::create_dir_all(&screens_dir).map_err(|e| ExportError::io(&screens_dir, e))?;

        let mut report = ExportReport::default();
        for (index, screen) in project.screens().iter().enumerate() {
            self.deadline.check()?;
            let name = routes.name_at(index).cloned().unwrap_or_else(|| screen.name());
            let emitted = self.generator.emit_screen(screen, &name, routes)?;

            let path = dest.join(emitted.path());
            fs::write(&path, &emitted.source).map_err(|e| ExportError::io(&path, e))?;
            debug!(screen = %emitted.label, path = %path.display(), "wrote screen");

            report.screens.push(ScreenEntry {
                label: emitted.label.clone(),
                file_name: emitted.file_name().to_string(),
                class_name: emitted.class_name().to_string(),
                route_path: emitted.route_path().to_string(),
            });
        }

        self.deadline.check()?;
        let main = self.generator.generate_entry_point(routes)?;
        let main_path = dest.join(ENTRY_POINT_PATH);
        fs::write(&main_path, main).map_err(|e| ExportError::io(&main_path, e))?;

        report.home_class = routes
            .home()
            .map(|name| name.class_name.clone())
            .unwrap_or_default();
        report.renamed = routes
            .renames()
            .iter()
            .map(|rename| RenamedScreen {
                label: rename.label.clone(),
                from: rename.original.file_name.clone(),
                to: rename.renamed.file_name.clone(),
            })
            .collect();

        Ok(report)
    }
}
