//! fluttergen command line interface
//!
//! Turns exported design documents into a zipped Flutter project, or prints
//! the generated Dart for inspection.
//!
//! # Usage
//!
//! ```bash
//! # Build the project archive
//! fluttergen export --input screens.json --output app.zip
//!
//! # Stream the archive to stdout, skipping screens that fail to parse
//! fluttergen export --input screens.json --output - --skip-invalid > app.zip
//!
//! # Print the Dart source of one screen, or of lib/main.dart
//! fluttergen preview --input screens.json --screen "Pantalla 1"
//! fluttergen preview --input screens.json --main
//! ```
//!
//! `screens.json` is a JSON object mapping each screen label to its design
//! document, either inline or as a serialized string. Set `RUST_LOG` to
//! control log output.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use fluttergen_codegen::{FlutterGenerator, RouteTable};
use fluttergen_core::Project;
use fluttergen_export::{
    DirectoryTemplate, ExportConfig, ExportRequest, Exporter, ScreenIsolation,
};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "fluttergen")]
#[command(version)]
#[command(about = "Generate Flutter projects from visual design documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble the project and write it as a zip archive
    Export {
        /// Screens file (reads stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Archive path, or `-` for stdout
        #[arg(short, long)]
        output: PathBuf,

        /// JSON export configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Copy this directory as the project skeleton instead of the builtin one
        #[arg(long)]
        template_dir: Option<PathBuf>,

        /// App title and package name source
        #[arg(long)]
        project_name: Option<String>,

        /// Leave out screens that fail to parse instead of failing
        #[arg(long)]
        skip_invalid: bool,

        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Print the export report as JSON to stderr
        #[arg(long)]
        report: bool,
    },

    /// Print generated Dart source without writing anything
    Preview {
        /// Screens file (reads stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Screen label to show (defaults to the first screen)
        #[arg(short, long, conflicts_with = "main")]
        screen: Option<String>,

        /// Show lib/main.dart instead of a screen
        #[arg(long)]
        main: bool,

        /// App title used in lib/main.dart
        #[arg(long, default_value = "flutter_project")]
        project_name: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fluttergen=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Export {
            input,
            output,
            config,
            template_dir,
            project_name,
            skip_invalid,
            timeout,
            report,
        } => {
            let mut config = match config {
                Some(path) => ExportConfig::from_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => ExportConfig::default(),
            };
            if let Some(name) = project_name {
                config.project_name = name;
            }
            if skip_invalid {
                config.isolation = ScreenIsolation::SkipInvalid;
            }
            if timeout.is_some() {
                config.timeout_secs = timeout;
            }

            let request = ExportRequest::from_json(&read_input(input.as_deref())?)?;
            let exporter = match template_dir {
                Some(dir) => Exporter::new(config, DirectoryTemplate::new(dir)),
                None => Exporter::with_builtin_template(config),
            };

            let summary = if output.as_os_str() == "-" {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                exporter.export_to(&request, &mut writer)?
            } else {
                let file = File::create(&output)
                    .with_context(|| format!("creating {}", output.display()))?;
                let mut writer = BufWriter::new(file);
                exporter.export_to(&request, &mut writer)?
            };

            tracing::info!(
                screens = summary.screens.len(),
                output = %output.display(),
                "wrote project archive"
            );
            if report {
                eprintln!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Ok(())
        }

        Commands::Preview {
            input,
            screen,
            main,
            project_name,
        } => {
            let request = ExportRequest::from_json(&read_input(input.as_deref())?)?;
            let source = preview(&request, screen.as_deref(), main, &project_name)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(source.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Read the screens file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("reading stdin")?;
            Ok(source)
        }
    }
}

/// Generated source of one screen, or of the entry point when `main` is set.
fn preview(
    request: &ExportRequest,
    screen: Option<&str>,
    main: bool,
    title: &str,
) -> anyhow::Result<String> {
    let project = Project::parse_all(request.iter())?;
    let routes = RouteTable::for_project(&project);
    let generator = FlutterGenerator::with_title(title)?;

    if main {
        return Ok(generator.generate_entry_point(&routes)?);
    }

    let index = match screen {
        Some(label) => project
            .labels()
            .position(|l| l == label)
            .ok_or_else(|| anyhow!("no screen labelled '{label}'"))?,
        None => 0,
    };
    let (Some(screen), Some(name)) = (project.screens().get(index), routes.name_at(index)) else {
        bail!("project has no screens");
    };
    Ok(generator.emit_screen(screen, name, &routes)?.source)
}
