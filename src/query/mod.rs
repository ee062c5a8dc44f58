//! Path-pattern query engine (component E): `PATH` / `PATH::*` / `PATH::**`
//! matching over one or more semantic models.

mod engine;
mod pattern;

pub use engine::{execute, get_ancestors, QueryResult};
pub use pattern::{parent_path, parse_multi, Pattern};
