//! # syster-core
//!
//! Semantic model builder, import resolver, path-pattern query engine, and
//! canonical source writer for SysML v2 and KerML textual notation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline  → orchestrates parse → build → resolve → query → write
//!   ↓
//! write     → canonical source writer
//! query     → path-pattern query engine
//!   ↓
//! resolve   → import resolution, file cache, package index
//!   ↓
//! build     → build context: parse events → semantic model
//!   ↓
//! model     → pure data: nodes, relationships, imports, aliases, trivia
//! core      → arena storage, parse-event contract
//! base      → primitives: interning, positions, line index
//! ```

// ============================================================================
// MODULES (dependency order: base → core → model → build → resolve → query → write → pipeline)
// ============================================================================

/// Foundation types: string interning, positions, line index.
pub mod base;

/// Arena-shaped storage and the parse-event contract.
pub mod core;

/// Pure data: nodes, relationships, imports, aliases, trivia, metadata.
pub mod model;

/// The build context: assembles a semantic model from a parse-event stream.
pub mod build;

/// Import resolution: file discovery, parse-cache, cycle detection.
pub mod resolve;

/// Path-pattern query engine (`PATH`, `PATH::*`, `PATH::**`).
pub mod query;

/// Canonical source writer: renders a semantic model back to text.
pub mod write;

/// Pipeline orchestrator tying every component together for one run.
pub mod pipeline;

/// Diagnostic types and the collector every component reports through.
pub mod diagnostics;

/// The pipeline-level error type.
pub mod error;

// Re-export foundation types.
pub use base::{IStr, Interner, LineCol, LineIndex, Location, Position, Span, TextRange, TextSize};

// Re-export the pieces most callers need without reaching into submodules.
pub use build::{drive, BuildContext};
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity};
pub use error::PipelineError;
pub use model::SemanticModel;
pub use pipeline::{ColorMode, OutputFormat, Pipeline, PipelineConfig, PipelineOutcome};
pub use query::{execute, get_ancestors, Pattern, QueryResult};
pub use resolve::{ImportParser, ImportResolver};
pub use write::{CanonicalWriter, WriteOptions};
