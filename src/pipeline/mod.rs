//! Pipeline orchestrator (component G): parse -> build -> resolve -> query
//! filter -> write/serialize, owning every cross-component resource for one
//! run.

mod config;
mod orchestrator;
mod selection;

pub use config::{ColorMode, OutputFormat, PipelineConfig};
pub use orchestrator::{Pipeline, PipelineOutcome};
pub use selection::{delete, select};
