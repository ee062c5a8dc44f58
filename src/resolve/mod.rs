//! Import resolution (component D): file discovery, parse-cache, cycle
//! detection, and the package index.

mod cache;
mod resolver;

pub use resolver::{ImportParser, ImportResolver};
