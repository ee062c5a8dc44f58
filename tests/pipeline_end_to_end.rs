//! Whole-pipeline scenarios: cycle detection through `Pipeline::process_file`,
//! and `--select` applied by the orchestrator rather than called directly.

use std::path::Path;

use syster_core::base::{Interner, Location, Position};
use syster_core::core::events::Event;
use syster_core::diagnostics::{codes, DiagnosticCollector};
use syster_core::model::{ImportKind, ImportVisibility, NodeKind, Reference};
use syster_core::{drive, ImportParser, OutputFormat, Pipeline, PipelineConfig, SemanticModel};

fn loc() -> Location {
    Location::new(0, Position::default())
}

/// A stand-in for the PEG-grammar parser: maps each file's own textual
/// content onto a small, fixed event stream keyed by a `package NAME;`
/// first line, exercising the pipeline without a real grammar.
struct FixtureParser;

impl ImportParser for FixtureParser {
    fn parse(
        &mut self,
        path: &Path,
        source: &str,
        interner: &mut Interner,
        _diag: &mut DiagnosticCollector,
    ) -> SemanticModel {
        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Root");
        let mut events = vec![Event::CreateNode {
            kind: NodeKind::Package,
            name: Some(interner.intern(name)),
            location: loc(),
        }];
        for line in source.lines() {
            let line = line.trim();
            if let Some(target) = line.strip_prefix("import ").and_then(|t| t.strip_suffix(";")) {
                let target = target.trim_end_matches("::*");
                events.push(Event::AddImport {
                    kind: ImportKind::Wildcard,
                    target: Reference::new(interner.intern(target), loc()),
                    visibility: ImportVisibility::Private,
                    location: loc(),
                });
            }
        }
        drive(path.display().to_string(), interner, events)
    }
}

#[test]
fn circular_imports_report_one_diagnostic_and_leave_the_pipeline_usable() {
    let dir = tempfile::tempdir().unwrap();
    let f1 = dir.path().join("F1.sysml");
    let f2 = dir.path().join("F2.sysml");
    std::fs::write(&f1, "package F1;\nimport F2::*;").unwrap();
    std::fs::write(&f2, "package F2;\nimport F1::*;").unwrap();

    let mut config = PipelineConfig::default();
    config.library_paths = vec![dir.path().to_path_buf()];
    let mut pipeline = Pipeline::new(config);

    let outcome = pipeline.process_file(&f1, &mut FixtureParser).unwrap();
    assert!(outcome.rendered.is_some());

    let circular = pipeline
        .diagnostics()
        .diagnostics()
        .iter()
        .filter(|d| d.code == Some(codes::E_CIRCULAR_IMPORT))
        .count();
    assert_eq!(circular, 1);
}

#[test]
fn select_patterns_prune_the_rendered_output() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("Root.sysml");
    std::fs::write(&root, "package Root;").unwrap();

    struct NestedParser;
    impl ImportParser for NestedParser {
        fn parse(
            &mut self,
            path: &Path,
            _source: &str,
            interner: &mut Interner,
            _diag: &mut DiagnosticCollector,
        ) -> SemanticModel {
            let events = vec![
                Event::CreateNode {
                    kind: NodeKind::Package,
                    name: Some(interner.intern("Root")),
                    location: loc(),
                },
                Event::EnterScope(interner.intern("Root")),
                Event::CreateNode {
                    kind: NodeKind::PartUsage,
                    name: Some(interner.intern("Keep")),
                    location: loc(),
                },
                Event::LeaveScope,
                Event::EnterScope(interner.intern("Root")),
                Event::CreateNode {
                    kind: NodeKind::PartUsage,
                    name: Some(interner.intern("Drop")),
                    location: loc(),
                },
                Event::LeaveScope,
            ];
            drive(path.display().to_string(), interner, events)
        }
    }

    let mut config = PipelineConfig::default();
    config.select_patterns = vec!["Root::Keep".to_string()];
    let mut pipeline = Pipeline::new(config);

    let outcome = pipeline.process_file(&root, &mut NestedParser).unwrap();
    let rendered = outcome.rendered.unwrap();
    assert!(rendered.contains("Keep"));
    assert!(!rendered.contains("Drop"));
}

#[test]
fn dry_run_skips_rendering_entirely() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("Root.sysml");
    std::fs::write(&root, "package Root;").unwrap();

    struct RootParser;
    impl ImportParser for RootParser {
        fn parse(
            &mut self,
            path: &Path,
            _source: &str,
            interner: &mut Interner,
            _diag: &mut DiagnosticCollector,
        ) -> SemanticModel {
            let events = vec![Event::CreateNode {
                kind: NodeKind::Package,
                name: Some(interner.intern("Root")),
                location: loc(),
            }];
            drive(path.display().to_string(), interner, events)
        }
    }

    let mut config = PipelineConfig::default();
    config.dry_run = true;
    let mut pipeline = Pipeline::new(config);
    let outcome = pipeline.process_file(&root, &mut RootParser).unwrap();
    assert!(outcome.rendered.is_none());
    assert!(outcome.model.find_by_id("Root").is_some());
}

#[cfg(feature = "interchange")]
#[test]
fn json_output_contains_every_top_level_node() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("Root.sysml");
    std::fs::write(&root, "package Root;").unwrap();

    struct RootParser;
    impl ImportParser for RootParser {
        fn parse(
            &mut self,
            path: &Path,
            _source: &str,
            interner: &mut Interner,
            _diag: &mut DiagnosticCollector,
        ) -> SemanticModel {
            let events = vec![Event::CreateNode {
                kind: NodeKind::Package,
                name: Some(interner.intern("Root")),
                location: loc(),
            }];
            drive(path.display().to_string(), interner, events)
        }
    }

    let mut config = PipelineConfig::default();
    config.output_format = OutputFormat::Json;
    let mut pipeline = Pipeline::new(config);
    let outcome = pipeline.process_file(&root, &mut RootParser).unwrap();
    let rendered = outcome.rendered.unwrap();
    assert!(rendered.contains("\"Root\""));
}

