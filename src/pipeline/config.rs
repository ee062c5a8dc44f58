//! The CLI-surface configuration struct (spec.md §6 "Configuration struct").
//!
//! Grounded on the teacher's `syntax/formatter/options.rs` `FormatOptions`:
//! a small options struct with a `Default` impl feeding a core algorithm. No
//! argument-parsing crate is added here — building this struct from `argv`
//! is the external CLI's job.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// No rendered output (diagnostics only).
    None,
    Json,
    /// Reserved for a future interchange format; not produced by this crate yet.
    Xml,
    Sysml,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Sysml
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Auto
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub parse_only: bool,
    pub no_resolve: bool,
    pub strict_imports: bool,
    pub verbose: bool,
    pub output_format: OutputFormat,

    pub select_patterns: Vec<String>,
    pub delete_patterns: Vec<String>,
    pub set_fragments: Vec<String>,
    pub set_targets: Vec<String>,

    pub create_scope: Option<String>,
    pub replace_scope: Option<String>,
    pub force_replace: bool,
    pub dry_run: bool,

    pub library_paths: Vec<PathBuf>,
    pub recursive: bool,

    pub treat_warnings_as_errors: bool,
    pub max_errors: Option<usize>,
    pub color_mode: ColorMode,
}
