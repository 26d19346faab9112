//! Flutter code generation from fluttergen design trees.
//!
//! This crate compiles parsed screens into Dart source: one widget tree per
//! screen, wrapped in a page class, plus an application entry point holding
//! the route table.
//!
//! # Example
//!
//! ```ignore
//! use fluttergen_codegen::{FlutterGenerator, RouteTable};
//!
//! let routes = RouteTable::for_project(&project);
//! let generator = FlutterGenerator::new()?;
//! let home = generator.emit_screen(&project.screens()[0], routes.name_at(0).unwrap(), &routes)?;
//! println!("{}", home.source);
//! ```

pub mod dart;
pub mod error;
pub mod generators;
pub mod routes;

pub use dart::{dart_double, dart_number, dart_string, package_name, ToDart};
pub use error::{CodegenError, Result};
pub use generators::{
    EmittedScreen, FlutterGenerator, GeneratedFile, TemplateEngine, WidgetCompiler,
    ENTRY_POINT_PATH, SCREENS_DIR,
};
pub use routes::{Rename, RouteTable};
