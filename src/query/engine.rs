//! Pattern-set execution against one or more semantic models (spec.md §4.E).
//!
//! Grounded on the teacher's `core/text_utils.rs` prefix/suffix matching
//! idiom — there is no teacher analog for a multi-model query engine, so the
//! result container borrows instead from the teacher's `hir::SymbolTable`
//! "flat id set, insertion-ordered" shape.

use indexmap::IndexSet;

use crate::base::IStr;
use crate::model::{Import, Node, Relationship, SemanticModel};
use crate::query::pattern::{matches_any, parent_path, Pattern};

/// The matched-id set a query run produces, plus the dependency-closed
/// relationships and imports the matched elements pull in (spec.md §4.E:
/// "the relationships whose both endpoints are present in the element set",
/// "the imports whose owner_scope is present in the element set"). Ids
/// rather than borrowed `&Node`s so a result can outlive any single model and
/// be re-queried against `find_by_id` on whichever model owns a given id.
#[derive(Debug, Default, Clone)]
pub struct QueryResult {
    ids: IndexSet<IStr>,
    relationships: Vec<Relationship>,
    imports: Vec<Import>,
}

impl QueryResult {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IStr> {
        self.ids.iter()
    }

    /// Resolve every matched id that belongs to `model` into its `Node`.
    pub fn nodes_in<'m>(&self, model: &'m SemanticModel) -> impl Iterator<Item = &'m Node> + 'm {
        let ids: Vec<IStr> = self.ids.iter().cloned().collect();
        ids.into_iter().filter_map(move |id| model.find_by_id(&id))
    }

    /// The relationships whose source and target are both matched elements.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// The imports owned by a matched element's scope.
    pub fn imports(&self) -> &[Import] {
        &self.imports
    }
}

/// Run `patterns` against every model in `models`, returning the union of
/// matches as one insertion-ordered set (spec.md §4.E "parallel flat set,
/// constant average time"), closed over the relationships and imports the
/// matched element set pulls in.
pub fn execute(patterns: &[Pattern], models: &[&SemanticModel]) -> QueryResult {
    let mut ids = IndexSet::new();
    for model in models {
        for node in model.elements.iter() {
            if matches_any(patterns, &node.id) {
                ids.insert(node.id.clone());
            }
        }
    }

    let mut relationships = Vec::new();
    let mut imports = Vec::new();
    for model in models {
        for relationship in model.relationships.iter() {
            if ids.contains(relationship.source.path.as_ref()) && ids.contains(relationship.target.path.as_ref()) {
                relationships.push(relationship.clone());
            }
        }
        for import in model.imports.iter() {
            if let Some(owner) = &import.owner_scope {
                if ids.contains(owner.as_ref()) {
                    imports.push(import.clone());
                }
            }
        }
    }

    QueryResult {
        ids,
        relationships,
        imports,
    }
}

/// Every id enclosing a matched id that is itself neither matched nor
/// already collected — the "stub scope" support a writer needs to print an
/// empty enclosing package around a deeply nested selection (spec.md §4.E,
/// §GLOSSARY "Stub scope").
pub fn get_ancestors(result: &QueryResult) -> IndexSet<IStr> {
    let mut ancestors: IndexSet<IStr> = IndexSet::new();
    for id in result.iter() {
        let mut current: &str = id.as_ref();
        while let Some(parent) = parent_path(current) {
            if result.contains(parent) || ancestors.contains(parent) {
                break;
            }
            ancestors.insert(parent.into());
            current = parent;
        }
    }
    ancestors
}
