//! Export pipeline for generated Flutter projects.
//!
//! An export takes an ordered set of labelled design documents and produces a
//! zip archive of a runnable Flutter project:
//!
//! 1. parse every document into a screen,
//! 2. resolve unique screen names and routes,
//! 3. materialize the project skeleton in a private workspace,
//! 4. write one page per screen plus `lib/main.dart`,
//! 5. package the project and hand the archive to the caller.
//!
//! Each export owns its workspace, so concurrent exports never share files.
//! The workspace is removed once the archive is dropped, on success and on
//! every failure path.

pub mod assemble;
pub mod config;
pub mod error;
pub mod package;
pub mod template;
pub mod workspace;

use std::io::Write;

use fluttergen_codegen::RouteTable;
use fluttergen_core::Project;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{error, info, warn};

pub use assemble::{ExportReport, ProjectAssembler, RenamedScreen, ScreenEntry, SkippedScreen};
pub use config::{ExportConfig, ScreenIsolation};
pub use error::{ExportError, ExportFailure, Result};
pub use package::{ExportedArchive, Packager};
pub use template::{BuiltinTemplate, DirectoryTemplate, TemplateProvider};
pub use workspace::{Deadline, ExportWorkspace};

/// Screens to export: label to serialized design document, in order.
///
/// The first screen is the home screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExportRequest(IndexMap<String, String>);

impl ExportRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a screen; a repeated label replaces the earlier document in place.
    pub fn insert(&mut self, label: impl Into<String>, document: impl Into<String>) {
        self.0.insert(label.into(), document.into());
    }

    pub fn with_screen(mut self, label: impl Into<String>, document: impl Into<String>) -> Self {
        self.insert(label, document);
        self
    }

    /// Parse a JSON object of label to document.
    ///
    /// Documents may be given as serialized strings or inline as JSON
    /// objects.
    pub fn from_json(source: &str) -> Result<Self> {
        let raw: IndexMap<String, serde_json::Value> =
            serde_json::from_str(source).map_err(ExportError::InvalidRequest)?;
        let screens = raw
            .into_iter()
            .map(|(label, document)| {
                let document = match document {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                };
                (label, document)
            })
            .collect();
        Ok(Self(screens))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(label, doc)| (label.as_str(), doc.as_str()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L: Into<String>, D: Into<String>> FromIterator<(L, D)> for ExportRequest {
    fn from_iter<I: IntoIterator<Item = (L, D)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (label, document) in iter {
            request.insert(label, document);
        }
        request
    }
}

/// Runs exports with one configuration and skeleton.
///
/// Safe to share between threads; every call works in its own workspace.
pub struct Exporter {
    config: ExportConfig,
    template: Box<dyn TemplateProvider>,
}

impl Exporter {
    pub fn new(config: ExportConfig, template: impl TemplateProvider + 'static) -> Self {
        Self {
            config,
            template: Box::new(template),
        }
    }

    /// Exporter using the embedded minimal skeleton.
    pub fn with_builtin_template(config: ExportConfig) -> Self {
        let template = BuiltinTemplate::new(&config.project_name);
        Self::new(config, template)
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Build the archive for `request`.
    ///
    /// Failure details are logged; the caller only learns that the export
    /// did not complete.
    pub fn export(&self, request: &ExportRequest) -> std::result::Result<ExportedArchive, ExportFailure> {
        self.try_export(request).map_err(fail)
    }

    /// Build the archive and stream it to `writer`.
    ///
    /// The workspace is removed once streaming settles, whatever the outcome.
    pub fn export_to<W: Write + ?Sized>(
        &self,
        request: &ExportRequest,
        writer: &mut W,
    ) -> std::result::Result<ExportReport, ExportFailure> {
        let archive = self.export(request)?;
        let report = archive.report().clone();
        archive.stream_to(writer).map_err(fail)?;
        Ok(report)
    }

    /// The pipeline with full error detail.
    pub fn try_export(&self, request: &ExportRequest) -> Result<ExportedArchive> {
        self.config.validate()?;
        let deadline = Deadline::new(self.config.timeout());

        let (project, skipped) = match self.config.isolation {
            ScreenIsolation::AbortAll => (Project::parse_all(request.iter())?, Vec::new()),
            ScreenIsolation::SkipInvalid => Project::parse_lenient(request.iter())?,
        };
        let skipped: Vec<SkippedScreen> = skipped
            .iter()
            .map(|err| {
                let label = err.screen().unwrap_or_default().to_string();
                warn!(screen = %label, error = %err, "skipping unparsable screen");
                SkippedScreen {
                    label,
                    reason: err.to_string(),
                }
            })
            .collect();

        let routes = RouteTable::for_project(&project);
        let workspace = ExportWorkspace::create(&self.config.work_root())?;
        let project_dir = workspace.project_dir();

        let mut report = ProjectAssembler::new(&self.config.project_name)?
            .with_deadline(deadline)
            .assemble(&project, &routes, self.template.as_ref(), &project_dir)?;
        report.skipped = skipped;

        let archive_path = workspace.archive_path();
        report.archive_entries = Packager::new(self.config.compression_level)
            .with_deadline(deadline)
            .package(&project_dir, &archive_path)?;

        info!(
            screens = report.screens.len(),
            skipped = report.skipped.len(),
            renamed = report.renamed.len(),
            entries = report.archive_entries,
            archive = %self.config.archive_name,
            "export finished"
        );
        Ok(ExportedArchive::new(
            archive_path,
            self.config.archive_name.clone(),
            report,
            workspace,
        ))
    }
}

fn fail(err: ExportError) -> ExportFailure {
    error!(error = %err, detail = ?err, "export failed");
    ExportFailure
}
