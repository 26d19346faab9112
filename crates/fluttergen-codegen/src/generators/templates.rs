//! Template engine for code generation.

use crate::dart::{dart_string, package_name};
use crate::error::{CodegenError, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Page class wrapping a compiled widget tree.
pub const SCREEN_TEMPLATE: &str = "import 'package:flutter/material.dart';

class {{class_name}} extends StatelessWidget {
  const {{class_name}}({super.key});

  @override
  Widget build(BuildContext context) {
    return Scaffold(
      body: SafeArea(
        child: Padding(
          padding: const EdgeInsets.all(16),
          child: {{body}},
        ),
      ),
    );
  }
}
";

/// Column at which the screen body starts.
pub const SCREEN_BODY_INDENT: usize = 10;

/// Application entry point with the route table.
pub const MAIN_TEMPLATE: &str = "import 'package:flutter/material.dart';
{{imports}}

void main() {
  runApp(const MyApp());
}

class MyApp extends StatelessWidget {
  const MyApp({super.key});

  @override
  Widget build(BuildContext context) {
    return MaterialApp(
      title: {{dart_string title}},
      debugShowCheckedModeBanner: false,
      home: const {{home_class}}(),
      routes: {
{{routes}}
      },
    );
  }
}
";

pub const PUBSPEC_TEMPLATE: &str = "name: {{package_name title}}
description: \"Flutter app generated by fluttergen.\"
publish_to: 'none'
version: 1.0.0+1

environment:
  sdk: '>=3.0.0 <4.0.0'

dependencies:
  flutter:
    sdk: flutter
  cupertino_icons: ^1.0.2

dev_dependencies:
  flutter_test:
    sdk: flutter
  flutter_lints: ^3.0.0

flutter:
  uses-material-design: true
";

pub const ANALYSIS_OPTIONS_TEMPLATE: &str = "include: package:flutter_lints/flutter.yaml
";

pub const GITIGNORE_TEMPLATE: &str = ".dart_tool/
.packages
.pub-cache/
.pub/
build/
.flutter-plugins
.flutter-plugins-dependencies
.idea/
*.iml
.DS_Store
";

pub const README_TEMPLATE: &str = "# {{title}}

Generated by fluttergen.

Create the platform folders, then run the app:

```
flutter create .
flutter pub get
flutter run
```
";

/// Registered name of the page template.
pub const SCREEN: &str = "screen";

/// Registered name of the entry point template.
pub const MAIN: &str = "main";

/// Skeleton templates, registered under their path in the project.
pub const SKELETON_TEMPLATES: [(&str, &str); 4] = [
    ("pubspec.yaml", PUBSPEC_TEMPLATE),
    ("analysis_options.yaml", ANALYSIS_OPTIONS_TEMPLATE),
    (".gitignore", GITIGNORE_TEMPLATE),
    ("README.md", README_TEMPLATE),
];

/// Template engine using Handlebars.
///
/// Output is source code, so HTML escaping is off and missing fields are
/// errors rather than empty strings.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a template engine with the builtin templates registered.
    pub fn new() -> Result<Self> {
        let mut engine = Self::bare();
        engine.register_template(SCREEN, SCREEN_TEMPLATE)?;
        engine.register_template(MAIN, MAIN_TEMPLATE)?;
        for (path, template) in SKELETON_TEMPLATES {
            engine.register_template(path, template)?;
        }
        Ok(engine)
    }

    fn bare() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        // Dart string literal helper
        handlebars.register_helper(
            "dart_string",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&dart_string(param))?;
                    Ok(())
                },
            ),
        );

        // Pub package name helper
        handlebars.register_helper(
            "package_name",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&package_name(param))?;
                    Ok(())
                },
            ),
        );
    }
}
