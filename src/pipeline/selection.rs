//! Building a pruned copy of a [`SemanticModel`] from a query result
//! (spec.md §4.E `getAncestors` / "stub scopes"; §6 `--select`/`--delete`).
//!
//! There is no teacher analog for model pruning — grounded instead on the
//! arena remap idiom already used by [`crate::model::SemanticModel::add_element`]
//! itself: rebuild by re-inserting in original order and recording an
//! old-index -> new-id map, since [`crate::core::Arena`] has no removal
//! operation to call directly.

use indexmap::IndexSet;

use crate::base::IStr;
use crate::core::Id;
use crate::model::{Node, SemanticModel};
use crate::query::QueryResult;

/// Keep only the nodes `keep` names, pruning every other node's `children`
/// entry that points at a dropped node, dropping top-level/owned imports
/// and aliases whose owner was dropped, and dropping any relationship whose
/// source or target fell outside `keep` (spec.md §8: a pruned document stays
/// closed under relationships and owned imports).
fn prune(model: &SemanticModel, keep: &IndexSet<IStr>) -> SemanticModel {
    let mut new_model = SemanticModel::new(model.source_name.clone());
    new_model.source_file = model.source_file.clone();

    let mut remap: Vec<Option<Id<Node>>> = vec![None; model.elements.len()];
    for (old_index, node) in model.elements.iter().enumerate() {
        if !keep.contains(node.id.as_ref()) {
            continue;
        }
        let mut cloned = node.clone();
        cloned.children.clear();
        let new_id = new_model.add_element(cloned);
        remap[old_index] = Some(new_id);
    }

    // Second pass: rebuild each surviving node's children list with
    // remapped ids, preserving original child ordering.
    for (old_index, node) in model.elements.iter().enumerate() {
        let Some(new_id) = remap[old_index] else {
            continue;
        };
        let mut new_children = Vec::new();
        for &child_id in &node.children {
            if let Some(new_child_id) = remap[child_id.index() as usize] {
                new_children.push(new_child_id);
            }
        }
        if let Some(new_node) = new_model.elements.get_mut(new_id) {
            new_node.children = new_children;
        }
    }

    for import in model.imports.iter() {
        let owner_kept = match &import.owner_scope {
            Some(owner) => keep.contains(owner.as_ref()),
            None => true,
        };
        if owner_kept {
            new_model.add_import(import.clone());
        }
    }
    for alias in model.aliases.iter() {
        let owner_kept = match &alias.owner_scope {
            Some(owner) => keep.contains(owner.as_ref()),
            None => true,
        };
        if owner_kept {
            new_model.add_alias(alias.clone());
        }
    }
    for relationship in model.relationships.iter() {
        let both_kept = keep.contains(relationship.source.path.as_ref())
            && keep.contains(relationship.target.path.as_ref());
        if both_kept {
            new_model.add_relationship(relationship.clone());
        }
    }

    new_model
}

/// `--select`: keep only matched nodes plus their enclosing stub scopes.
pub fn select(model: &SemanticModel, result: &QueryResult, ancestors: &IndexSet<IStr>) -> SemanticModel {
    let mut keep: IndexSet<IStr> = IndexSet::new();
    keep.extend(result.iter().cloned());
    keep.extend(ancestors.iter().cloned());
    prune(model, &keep)
}

/// `--delete`: keep everything not matched.
pub fn delete(model: &SemanticModel, result: &QueryResult) -> SemanticModel {
    let keep: IndexSet<IStr> = model
        .elements
        .iter()
        .map(|node| node.id.clone())
        .filter(|id| !result.contains(id))
        .collect();
    prune(model, &keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Interner, Location, Position};
    use crate::model::NodeKind;
    use crate::query::{execute, get_ancestors, Pattern};

    fn loc() -> Location {
        Location::new(0, Position::default())
    }

    fn build_sample(interner: &mut Interner) -> SemanticModel {
        let mut model = SemanticModel::new("t.sysml");
        let pkg_id = interner.intern("P");
        let mut pkg = Node::new(pkg_id.clone(), NodeKind::Package, loc());

        let a_id = interner.intern("P::A");
        let mut a = Node::new(a_id.clone(), NodeKind::PartUsage, loc());
        a.parent_id = Some(pkg_id.clone());
        let b_id = interner.intern("P::B");
        let mut b = Node::new(b_id, NodeKind::PartUsage, loc());
        b.parent_id = Some(pkg_id.clone());

        let a_new_id = model.add_element(a);
        let b_new_id = model.add_element(b);
        pkg.children.push(a_new_id);
        pkg.children.push(b_new_id);
        model.add_element(pkg);
        model
    }

    #[test]
    fn select_keeps_matched_node_and_its_stub_ancestor() {
        let mut interner = Interner::new();
        let model = build_sample(&mut interner);
        let patterns = vec![Pattern::parse("P::A")];
        let result = execute(&patterns, &[&model]);
        let ancestors = get_ancestors(&result);

        let pruned = select(&model, &result, &ancestors);
        assert!(pruned.find_by_id("P::A").is_some());
        assert!(pruned.find_by_id("P").is_some());
        assert!(pruned.find_by_id("P::B").is_none());
        assert_eq!(pruned.find_by_id("P").unwrap().children.len(), 1);
    }

    #[test]
    fn delete_removes_matched_node_only() {
        let mut interner = Interner::new();
        let model = build_sample(&mut interner);
        let patterns = vec![Pattern::parse("P::A")];
        let result = execute(&patterns, &[&model]);

        let pruned = delete(&model, &result);
        assert!(pruned.find_by_id("P::A").is_none());
        assert!(pruned.find_by_id("P::B").is_some());
        assert!(pruned.find_by_id("P").is_some());
        assert_eq!(pruned.find_by_id("P").unwrap().children.len(), 1);
    }

    #[test]
    fn delete_drops_a_relationship_whose_endpoint_was_removed() {
        use crate::model::{Reference, Relationship, RelationshipKind};

        let mut interner = Interner::new();
        let mut model = build_sample(&mut interner);
        model.add_relationship(Relationship::new(
            interner.intern("P::_spec_0"),
            RelationshipKind::Specialization,
            Reference::new(interner.intern("P::B"), loc()),
            Reference::new(interner.intern("P::A"), loc()),
            loc(),
        ));

        let patterns = vec![Pattern::parse("P::A")];
        let result = execute(&patterns, &[&model]);
        let pruned = delete(&model, &result);

        assert!(pruned.find_by_id("P::A").is_none());
        assert!(pruned.relationships.is_empty(), "dangling relationship survived pruning");
    }
}
