//! Flutter page and entry point generator.

use fluttergen_core::{Project, Screen, ScreenName};
use serde::Serialize;
use tracing::{debug, warn};

use super::templates::{TemplateEngine, MAIN, SCREEN, SCREEN_BODY_INDENT, SKELETON_TEMPLATES};
use super::widget::WidgetCompiler;
use super::{EmittedScreen, GeneratedFile};
use crate::dart::dart_string;
use crate::error::{CodegenError, Result};
use crate::routes::RouteTable;

/// Body used when a screen has no root node.
const EMPTY_BODY: &str = "SizedBox.shrink()";

/// Indentation of route entries inside the `routes` map literal.
const ROUTE_INDENT: usize = 8;

#[derive(Serialize)]
struct ScreenData<'a> {
    class_name: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct MainData<'a> {
    title: &'a str,
    imports: String,
    home_class: &'a str,
    routes: String,
}

#[derive(Serialize)]
struct SkeletonData<'a> {
    title: &'a str,
}

/// Flutter code generator.
pub struct FlutterGenerator<'a> {
    engine: TemplateEngine<'a>,
    title: String,
}

impl<'a> FlutterGenerator<'a> {
    /// Create a new Flutter generator.
    pub fn new() -> Result<Self> {
        Self::with_title("Flutter App")
    }

    /// Create with a custom application title.
    pub fn with_title(title: &str) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            title: title.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Generate the page class of one screen.
    pub fn emit_screen(
        &self,
        screen: &Screen,
        name: &ScreenName,
        routes: &RouteTable,
    ) -> Result<EmittedScreen> {
        let mut body = WidgetCompiler::new(&screen.tree, routes).compile_root(SCREEN_BODY_INDENT);
        if body.is_empty() {
            warn!(screen = %screen.label, "screen has no root node, emitting an empty page");
            body = EMPTY_BODY.to_string();
        }

        let source = self.engine.render(
            SCREEN,
            &ScreenData {
                class_name: &name.class_name,
                body: &body,
            },
        )?;
        debug!(screen = %screen.label, file = %name.file_name, "emitted screen");

        Ok(EmittedScreen {
            label: screen.label.clone(),
            name: name.clone(),
            source,
        })
    }

    /// Generate every screen of a project, in order, under the names
    /// resolved by `routes`.
    pub fn emit_project(&self, project: &Project, routes: &RouteTable) -> Result<Vec<EmittedScreen>> {
        project
            .screens()
            .iter()
            .enumerate()
            .map(|(index, screen)| {
                let name = routes
                    .name_at(index)
                    .cloned()
                    .unwrap_or_else(|| screen.name());
                self.emit_screen(screen, &name, routes)
            })
            .collect()
    }

    /// Generate `lib/main.dart`: imports, the home screen and one named
    /// route per screen.
    pub fn generate_entry_point(&self, routes: &RouteTable) -> Result<String> {
        let home = routes.home().ok_or(CodegenError::NoScreens)?;
        let indent = " ".repeat(ROUTE_INDENT);

        let imports = routes
            .entries()
            .map(|(_, name)| format!("import 'screens/{}';", name.file_name))
            .collect::<Vec<_>>()
            .join("\n");
        let route_lines = routes
            .entries()
            .map(|(_, name)| {
                format!(
                    "{}{}: (context) => const {}(),",
                    indent,
                    dart_string(&name.route_path),
                    name.class_name
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        self.engine.render(
            MAIN,
            &MainData {
                title: &self.title,
                imports,
                home_class: &home.class_name,
                routes: route_lines,
            },
        )
    }

    /// Generate the minimal project skeleton: package manifest, lints,
    /// ignore file and readme.
    pub fn generate_skeleton(&self) -> Result<Vec<GeneratedFile>> {
        let data = SkeletonData { title: &self.title };
        SKELETON_TEMPLATES
            .into_iter()
            .map(|(path, _)| -> Result<GeneratedFile> {
                Ok(GeneratedFile {
                    path: path.to_string(),
                    content: self.engine.render(path, &data)?,
                })
            })
            .collect()
    }
}
