//! Flutter generators: widget trees, screen pages and the app entry point.

mod flutter;
mod templates;
mod widget;

pub use flutter::FlutterGenerator;
pub use templates::{TemplateEngine, SCREEN_BODY_INDENT};
pub use widget::WidgetCompiler;

use fluttergen_core::ScreenName;

/// Directory, relative to the project root, holding generated screens.
pub const SCREENS_DIR: &str = "lib/screens";

/// Path, relative to the project root, of the app entry point.
pub const ENTRY_POINT_PATH: &str = "lib/main.dart";

/// A generated project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File path relative to the project root, `/`-separated.
    pub path: String,
    pub content: String,
}

/// Generated source for one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedScreen {
    /// The screen label as supplied by the caller.
    pub label: String,
    pub name: ScreenName,
    /// Complete Dart source of the screen's page.
    pub source: String,
}

impl EmittedScreen {
    pub fn file_name(&self) -> &str {
        &self.name.file_name
    }

    pub fn class_name(&self) -> &str {
        &self.name.class_name
    }

    pub fn route_path(&self) -> &str {
        &self.name.route_path
    }

    /// File path relative to the project root.
    pub fn path(&self) -> String {
        format!("{}/{}", SCREENS_DIR, self.name.file_name)
    }
}
