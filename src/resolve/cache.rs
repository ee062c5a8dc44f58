//! The resolver's two caches: parsed models by canonical path, and the
//! top-level-package-name → canonical-path index.
//!
//! Grounded on the teacher's `project/cached_stdlib.rs` / `workspace_loader.rs`
//! split between a file cache and a package-name index, generalized from
//! "preloaded stdlib" to "every file the resolver has ever parsed."

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::model::SemanticModel;

/// Canonical path → parsed model, insertion-ordered so `getAllModels` can
/// return "first-added first" (spec.md §4.D).
#[derive(Debug, Default)]
pub struct FileCache {
    models: FxHashMap<PathBuf, SemanticModel>,
    order: Vec<PathBuf>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a model for `path`. Overwriting an existing entry keeps its
    /// original position in `order`, matching "idempotence" for repeated
    /// `cacheModel` calls (spec.md §8).
    pub fn upsert(&mut self, path: PathBuf, model: SemanticModel) {
        if !self.models.contains_key(&path) {
            self.order.push(path.clone());
        }
        self.models.insert(path, model);
    }

    pub fn get(&self, path: &Path) -> Option<&SemanticModel> {
        self.models.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.models.contains_key(path)
    }

    /// All cached models, first-added first.
    pub fn all_in_order(&self) -> impl Iterator<Item = &SemanticModel> {
        self.order.iter().filter_map(|path| self.models.get(path))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Top-level package name → canonical file path, first-wins.
#[derive(Debug, Default)]
pub struct PackageIndex {
    entries: FxHashMap<String, PathBuf>,
}

impl PackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name -> path` unless already claimed. Returns `false` (a
    /// "later file claims the same package" event, reported verbose-only by
    /// the resolver) when an entry already existed.
    pub fn register(&mut self, name: String, path: PathBuf) -> bool {
        if self.entries.contains_key(&name) {
            false
        } else {
            self.entries.insert(name, path);
            true
        }
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(|p| p.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SemanticModel;

    #[test]
    fn upsert_overwrites_but_preserves_order() {
        let mut cache = FileCache::new();
        cache.upsert(PathBuf::from("/a"), SemanticModel::new("a"));
        cache.upsert(PathBuf::from("/b"), SemanticModel::new("b"));
        cache.upsert(PathBuf::from("/a"), SemanticModel::new("a2"));
        let names: Vec<_> = cache.all_in_order().map(|m| m.source_name.clone()).collect();
        assert_eq!(names, vec!["a2".to_string(), "b".to_string()]);
    }

    #[test]
    fn package_index_is_first_wins() {
        let mut index = PackageIndex::new();
        assert!(index.register("Pkg".into(), PathBuf::from("/first.sysml")));
        assert!(!index.register("Pkg".into(), PathBuf::from("/second.sysml")));
        assert_eq!(index.get("Pkg"), Some(Path::new("/first.sysml")));
    }
}
