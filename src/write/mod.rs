//! Canonical source writer (component F): renders a [`crate::model::SemanticModel`]
//! back to textual `.sysml`/`.kerml` source.

mod keywords;
mod options;
mod writer;

pub use options::WriteOptions;
pub use writer::CanonicalWriter;
