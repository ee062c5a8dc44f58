//! The top-level semantic model: four insertion-ordered sequences over one
//! source, plus an optional record of the file it was parsed from.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::base::{IStr, LineIndex};
use crate::core::{Arena, Id};
use crate::model::alias::Alias;
use crate::model::import::Import;
use crate::model::node::Node;
use crate::model::relationship::Relationship;

/// The file a model was parsed from, retained so the writer and pipeline
/// can re-derive line/column positions and re-emit the same path.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub line_index: LineIndex,
}

/// Pure data: the four insertion-ordered sequences plus an id index used by
/// the build context and resolver to look a node up by its interned id
/// without a linear scan.
#[derive(Debug, Clone)]
pub struct SemanticModel {
    pub source_name: String,
    pub source_file: Option<SourceFile>,
    pub elements: Arena<Node>,
    pub relationships: Arena<Relationship>,
    pub imports: Arena<Import>,
    pub aliases: Arena<Alias>,
    id_index: FxHashMap<IStr, Id<Node>>,
}

impl SemanticModel {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            source_file: None,
            elements: Arena::new(),
            relationships: Arena::new(),
            imports: Arena::new(),
            aliases: Arena::new(),
            id_index: FxHashMap::default(),
        }
    }

    /// Append a node, recording it in the id index. Mirrors the build
    /// context's `addElement` (spec.md §4.C): a separate explicit step from
    /// `buildNode` so callers may discard a partially built node.
    pub fn add_element(&mut self, node: Node) -> Id<Node> {
        let id = node.id.clone();
        let node_id = self.elements.alloc(node);
        self.id_index.insert(id, node_id);
        node_id
    }

    pub fn add_relationship(&mut self, relationship: Relationship) -> Id<Relationship> {
        self.relationships.alloc(relationship)
    }

    pub fn add_import(&mut self, import: Import) -> Id<Import> {
        self.imports.alloc(import)
    }

    pub fn add_alias(&mut self, alias: Alias) -> Id<Alias> {
        self.aliases.alloc(alias)
    }

    /// Look up a node by its interned fully-qualified id.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.id_index.get(id).map(|node_id| &self.elements[*node_id])
    }

    pub fn node_id_for(&self, id: &str) -> Option<Id<Node>> {
        self.id_index.get(id).copied()
    }

    /// The first element whose kind is package-like and whose parent is
    /// absent, per spec.md §4.D `cacheModel`'s top-level-package rule.
    pub fn top_level_package(&self) -> Option<&Node> {
        self.elements
            .iter()
            .find(|node| node.kind.is_package() && node.parent_id.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Interner, Location, Position};
    use crate::model::kind::NodeKind;

    #[test]
    fn add_element_is_retrievable_by_id() {
        let mut interner = Interner::new();
        let mut model = SemanticModel::new("test.sysml");
        let id = interner.intern("P::Child");
        let node = Node::new(id.clone(), NodeKind::PartUsage, Location::new(0, Position::default()));
        model.add_element(node);
        assert!(model.find_by_id("P::Child").is_some());
        assert!(model.find_by_id("P::Nope").is_none());
    }

    #[test]
    fn top_level_package_is_first_rootless_package() {
        let mut interner = Interner::new();
        let mut model = SemanticModel::new("test.sysml");
        let pkg_id = interner.intern("Pkg");
        let mut pkg = Node::new(pkg_id, NodeKind::Package, Location::new(0, Position::default()));
        pkg.name = Some(interner.intern("Pkg"));
        model.add_element(pkg);
        assert_eq!(
            model.top_level_package().unwrap().name.as_deref(),
            Some("Pkg")
        );
    }
}
