//! Pipeline-level error type.
//!
//! Grounded on the teacher's `interchange/error.rs` `InterchangeError`: a
//! `thiserror`-derived enum with one variant per external failure cause the
//! pipeline cannot represent as a diagnostic (spec.md §7 "OUT_OF_MEMORY —
//! fatal to the current operation").

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },

    #[error("allocation failed while processing {path}")]
    OutOfMemory { path: PathBuf },

    #[cfg(feature = "interchange")]
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
