//! Export pipeline tests against the real filesystem.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use fluttergen_export::{
    DirectoryTemplate, ExportConfig, ExportFailure, ExportRequest, Exporter, ScreenIsolation,
};
use tempfile::TempDir;
use zip::ZipArchive;

const HOME_DOC: &str = r#"{
    "ROOT": {
        "type": { "resolvedName": "Container" },
        "isCanvas": true,
        "props": { "padding": "16px", "gap": "8px" },
        "nodes": ["greeting", "next"]
    },
    "greeting": {
        "type": { "resolvedName": "Text" },
        "props": { "text": "Hola", "fontSize": "20px" },
        "parent": "ROOT"
    },
    "next": {
        "type": { "resolvedName": "Button" },
        "props": { "text": "Next", "gotoScreen": "Pantalla 2" },
        "parent": "ROOT"
    }
}"#;

const SECOND_DOC: &str = r#"{
    "ROOT": {
        "type": { "resolvedName": "Container" },
        "nodes": ["check"]
    },
    "check": {
        "type": "Checkbox",
        "props": { "label": "Accept" },
        "parent": "ROOT"
    }
}"#;

fn config(root: &TempDir) -> ExportConfig {
    ExportConfig {
        work_root: Some(root.path().to_path_buf()),
        ..Default::default()
    }
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).unwrap().next().is_none()
}

fn read_entry(archive: &mut ZipArchive<io::Cursor<Vec<u8>>>, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[test]
fn test_single_screen_export() {
    let root = TempDir::new().unwrap();
    let exporter = Exporter::with_builtin_template(config(&root));
    let request = ExportRequest::new().with_screen("Home", HOME_DOC);

    let mut out = Vec::new();
    let report = exporter.export_to(&request, &mut out).unwrap();

    assert_eq!(report.home_class, "ScreenHome");
    assert_eq!(report.screens.len(), 1);
    assert!(is_empty_dir(root.path()));

    let mut archive = ZipArchive::new(io::Cursor::new(out)).unwrap();
    let screen_files: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("lib/screens/") && name.ends_with(".dart"))
        .map(str::to_string)
        .collect();
    assert_eq!(screen_files, ["lib/screens/screen_home.dart"]);

    let home = read_entry(&mut archive, "lib/screens/screen_home.dart");
    assert!(home.contains("class ScreenHome extends StatelessWidget"));
    assert!(home.contains("'Hola',"));
    assert!(home.contains("SizedBox(height: 8),"));
    // Target screen is not part of this export.
    assert!(home.contains("onPressed: () {},"));

    let main = read_entry(&mut archive, "lib/main.dart");
    assert!(main.contains("import 'screens/screen_home.dart';"));
    assert!(main.contains("home: const ScreenHome(),"));
    assert!(main.contains("'/Home': (context) => const ScreenHome(),"));

    let pubspec = read_entry(&mut archive, "pubspec.yaml");
    assert!(pubspec.starts_with("name: flutter_project\n"));
}

#[test]
fn test_navigation_between_screens() {
    let root = TempDir::new().unwrap();
    let exporter = Exporter::with_builtin_template(config(&root));
    let request = ExportRequest::new()
        .with_screen("Home", HOME_DOC)
        .with_screen("Pantalla 2", SECOND_DOC);

    let bytes = exporter.export(&request).unwrap().into_bytes().unwrap();
    assert!(is_empty_dir(root.path()));

    let mut archive = ZipArchive::new(io::Cursor::new(bytes)).unwrap();
    let home = read_entry(&mut archive, "lib/screens/screen_home.dart");
    assert!(home.contains("onPressed: () => Navigator.pushNamed(context, '/Pantalla2'),"));

    let second = read_entry(&mut archive, "lib/screens/screen_pantalla2.dart");
    assert!(second.contains("Text('Accept'),"));

    let main = read_entry(&mut archive, "lib/main.dart");
    assert!(main.contains("'/Pantalla2': (context) => const ScreenPantalla2(),"));
}

#[test]
fn test_archive_is_written_in_workspace_until_dropped() {
    let root = TempDir::new().unwrap();
    let exporter = Exporter::with_builtin_template(config(&root));
    let request = ExportRequest::new().with_screen("Home", HOME_DOC);

    let archive = exporter.export(&request).unwrap();
    assert_eq!(archive.file_name(), "flutter_project.zip");
    assert!(archive.path().is_file());
    assert!(archive.workspace().starts_with(root.path()));
    assert!(archive.report().archive_entries > 0);

    let workspace = archive.workspace().to_path_buf();
    drop(archive);
    assert!(!workspace.exists());
    assert!(is_empty_dir(root.path()));
}

#[test]
fn test_uncompressed_export() {
    let root = TempDir::new().unwrap();
    let config = ExportConfig {
        compression_level: 0,
        ..config(&root)
    };
    let request = ExportRequest::new().with_screen("Home", HOME_DOC);
    let bytes = Exporter::with_builtin_template(config)
        .export(&request)
        .unwrap()
        .into_bytes()
        .unwrap();

    let mut archive = ZipArchive::new(io::Cursor::new(bytes)).unwrap();
    assert_eq!(
        archive.by_name("lib/main.dart").unwrap().compression(),
        zip::CompressionMethod::Stored
    );
    assert!(read_entry(&mut archive, "lib/main.dart").contains("home: const ScreenHome(),"));
    assert!(is_empty_dir(root.path()));
}

#[test]
fn test_archive_name_matching_project_dir() {
    let root = TempDir::new().unwrap();
    let config = ExportConfig {
        archive_name: "project".to_string(),
        ..config(&root)
    };
    let request = ExportRequest::new().with_screen("Home", HOME_DOC);

    let archive = Exporter::with_builtin_template(config).export(&request).unwrap();
    assert_eq!(archive.file_name(), "project");
    assert!(archive.path().is_file());

    let mut zip = ZipArchive::new(io::Cursor::new(archive.into_bytes().unwrap())).unwrap();
    assert!(zip.by_name("lib/screens/screen_home.dart").is_ok());
    assert!(is_empty_dir(root.path()));
}

#[test]
fn test_invalid_screen_aborts_and_cleans_up() {
    let root = TempDir::new().unwrap();
    let exporter = Exporter::with_builtin_template(config(&root));
    let request = ExportRequest::new()
        .with_screen("Home", HOME_DOC)
        .with_screen("Broken", "{ not json");

    assert_eq!(exporter.export(&request).unwrap_err(), ExportFailure);
    assert!(is_empty_dir(root.path()));
}

#[test]
fn test_skip_invalid_screens() {
    let root = TempDir::new().unwrap();
    let config = ExportConfig {
        isolation: ScreenIsolation::SkipInvalid,
        ..config(&root)
    };
    let exporter = Exporter::with_builtin_template(config);
    let request = ExportRequest::new()
        .with_screen("Broken", "[]")
        .with_screen("Home", HOME_DOC);

    let archive = exporter.export(&request).unwrap();
    let report = archive.report().clone();
    assert_eq!(report.home_class, "ScreenHome");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].label, "Broken");

    let mut zip = ZipArchive::new(io::Cursor::new(archive.into_bytes().unwrap())).unwrap();
    assert!(zip.by_name("lib/screens/screen_broken.dart").is_err());
    assert!(zip.by_name("lib/screens/screen_home.dart").is_ok());
}

#[test]
fn test_skip_invalid_with_nothing_left_fails() {
    let root = TempDir::new().unwrap();
    let config = ExportConfig {
        isolation: ScreenIsolation::SkipInvalid,
        ..config(&root)
    };
    let request = ExportRequest::new().with_screen("Broken", "nope");
    assert!(Exporter::with_builtin_template(config).export(&request).is_err());
    assert!(is_empty_dir(root.path()));
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_failed_transmission_cleans_up() {
    let root = TempDir::new().unwrap();
    let exporter = Exporter::with_builtin_template(config(&root));
    let request = ExportRequest::new().with_screen("Home", HOME_DOC);

    let result = exporter.export_to(&request, &mut FailingWriter);
    assert_eq!(result.unwrap_err(), ExportFailure);
    assert!(is_empty_dir(root.path()));
}

#[test]
fn test_timeout_cleans_up() {
    let root = TempDir::new().unwrap();
    let config = ExportConfig {
        timeout_secs: Some(0),
        ..config(&root)
    };
    let request = ExportRequest::new().with_screen("Home", HOME_DOC);
    assert!(Exporter::with_builtin_template(config).export(&request).is_err());
    assert!(is_empty_dir(root.path()));
}

#[test]
fn test_concurrent_exports_are_isolated() {
    let root = TempDir::new().unwrap();
    let exporter = Exporter::with_builtin_template(config(&root));

    let outputs: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["Alpha", "Beta", "Gamma", "Delta"]
            .into_iter()
            .map(|label| {
                let exporter = &exporter;
                scope.spawn(move || {
                    let request = ExportRequest::new().with_screen(label, HOME_DOC);
                    let mut out = Vec::new();
                    exporter.export_to(&request, &mut out).unwrap();
                    out
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (bytes, label) in outputs.into_iter().zip(["alpha", "beta", "gamma", "delta"]) {
        let mut archive = ZipArchive::new(io::Cursor::new(bytes)).unwrap();
        let screens: Vec<String> = archive
            .file_names()
            .filter(|name| name.starts_with("lib/screens/") && name.ends_with(".dart"))
            .map(str::to_string)
            .collect();
        assert_eq!(screens, [format!("lib/screens/screen_{label}.dart")]);
        assert!(read_entry(&mut archive, "lib/main.dart").contains("MaterialApp("));
    }
    assert!(is_empty_dir(root.path()));
}

#[test]
fn test_directory_template_export() {
    let root = TempDir::new().unwrap();
    let template = TempDir::new().unwrap();
    fs::create_dir_all(template.path().join("android")).unwrap();
    File::create(template.path().join("android/build.gradle"))
        .unwrap()
        .write_all(b"// gradle")
        .unwrap();
    fs::write(template.path().join("pubspec.yaml"), "name: from_template\n").unwrap();

    let exporter = Exporter::new(config(&root), DirectoryTemplate::new(template.path()));
    let request = ExportRequest::new().with_screen("Home", HOME_DOC);
    let bytes = exporter.export(&request).unwrap().into_bytes().unwrap();

    let mut archive = ZipArchive::new(io::Cursor::new(bytes)).unwrap();
    assert_eq!(read_entry(&mut archive, "android/build.gradle"), "// gradle");
    assert_eq!(read_entry(&mut archive, "pubspec.yaml"), "name: from_template\n");
    assert!(archive.by_name("lib/main.dart").is_ok());
    // The template directory itself is untouched.
    assert!(!template.path().join("lib").exists());
}

#[test]
fn test_missing_template_directory_fails() {
    let root = TempDir::new().unwrap();
    let exporter = Exporter::new(config(&root), DirectoryTemplate::new(root.path().join("missing")));
    let request = ExportRequest::new().with_screen("Home", HOME_DOC);
    assert!(exporter.export(&request).is_err());
}
