//! Core types for the fluttergen screen compiler.
//!
//! This crate provides the foundational types used across the other fluttergen crates:
//! - The design tree model (nodes, props, node kinds) parsed from serialized screens
//! - Screens, projects and screen-name normalization
//! - Typed conversion of web-style property values (colors, lengths, insets, alignment)
//! - Error types

pub mod ast;
pub mod errors;
pub mod naming;
pub mod project;
pub mod style;

pub use ast::*;
pub use errors::*;
pub use naming::*;
pub use project::*;
pub use style::*;
