//! Diagnostic types and the collector the pipeline, resolver, and (future)
//! semantic validator report through.
//!
//! Grounded on the teacher's `hir/diagnostics.rs` (`Severity`, `Diagnostic`,
//! `DiagnosticCollector`, the `codes` module), generalized from per-symbol
//! semantic checks to the path-and-location diagnostics this crate's
//! resolver and pipeline need (spec.md §7).

use std::path::PathBuf;
use std::sync::Arc;

use crate::base::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Related location attached to a diagnostic (e.g. "previous definition here").
#[derive(Clone, Debug)]
pub struct RelatedInfo {
    pub path: Option<PathBuf>,
    pub position: Position,
    pub message: Arc<str>,
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub path: Option<PathBuf>,
    pub position: Position,
    pub severity: Severity,
    pub code: Option<&'static str>,
    pub message: Arc<str>,
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    pub fn new(severity: Severity, position: Position, message: impl Into<Arc<str>>) -> Self {
        Self {
            path: None,
            position,
            severity,
            code: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    pub fn error(position: Position, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Error, position, message)
    }

    pub fn warning(position: Position, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Warning, position, message)
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }
}

/// Stable symbolic diagnostic codes (spec.md §6, §7).
pub mod codes {
    pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
    pub const FILE_READ: &str = "FILE_READ";
    pub const INVALID_UTF8: &str = "INVALID_UTF8";
    pub const SYNTAX: &str = "SYNTAX";

    pub const E_IMPORT_NOT_FOUND: &str = "E_IMPORT_NOT_FOUND";
    pub const E_CIRCULAR_IMPORT: &str = "E_CIRCULAR_IMPORT";
    pub const E_UNDEFINED_TYPE: &str = "E_UNDEFINED_TYPE";
    pub const E_DUPLICATE_NAME: &str = "E_DUPLICATE_NAME";
    pub const E_CIRCULAR_SPECIALIZATION: &str = "E_CIRCULAR_SPECIALIZATION";
    pub const E_TYPE_INCOMPATIBLE: &str = "E_TYPE_INCOMPATIBLE";

    pub const OUT_OF_MEMORY: &str = "OUT_OF_MEMORY";
}

/// Accumulates diagnostics for a pipeline run. The caller decides when to
/// stop (`should_stop`); the resolver honors this at each import (spec.md §7).
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    max_errors: Option<usize>,
    treat_warnings_as_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_errors(mut self, max_errors: Option<usize>) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn with_treat_warnings_as_errors(mut self, treat_warnings_as_errors: bool) -> Self {
        self.treat_warnings_as_errors = treat_warnings_as_errors;
        self
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Whether the exit code should reflect failure: real errors, or
    /// warnings elevated by `treat_warnings_as_errors` (spec.md §7 — this
    /// elevation changes the exit code only, never the report itself).
    pub fn has_errors_for_exit(&self) -> bool {
        self.has_errors() || (self.treat_warnings_as_errors && self.warning_count() > 0)
    }

    /// Whether the caller configured a `max_errors` bound and it has been
    /// reached — consulted by the resolver before descending into each
    /// import (spec.md §4.D `resolveImports`: "Early-exit on `diag.shouldStop()`").
    pub fn should_stop(&self) -> bool {
        self.max_errors.is_some_and(|max| self.error_count() >= max)
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}
