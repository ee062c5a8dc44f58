//! The build context: transforms a forward stream of parse events into a
//! fully populated [`SemanticModel`]. This is the hardest single component
//! (spec.md §4.C) — scope tracking, stable id assignment, anonymous naming,
//! and the pending-slot buffer all live here.
//!
//! Grounded on the teacher's `hir/symbols/context.rs` `ExtractionContext`
//! (scope stack, `qualified_name`, `next_anon_scope`) and `helpers.rs`
//! (classification-by-match idiom), generalized from "AST node to `HirSymbol`"
//! to "parse event to `Node`".

use crate::base::{IStr, Interner, Location};
use crate::build::pending::PendingState;
use crate::core::Id;
use crate::model::{
    Alias, Import, ImportKind, ImportVisibility, MetadataFeature, MetadataUsage, Multiplicity,
    Node, NodeKind, Reference, Relationship, RelationshipKind, SemanticModel,
};

/// Stateful assembler producing a [`SemanticModel`] from parse events.
///
/// Borrows the interner rather than owning it, since the resolver shares one
/// interner across every model it builds during a single pipeline run (spec.md
/// §4.D: "parse ... via an injected parser function that shares the arena and
/// intern").
pub struct BuildContext<'a> {
    interner: &'a mut Interner,
    model: SemanticModel,
    scope_stack: Vec<IStr>,
    anon_counter: u32,
    rel_counter: u32,
    pending: PendingState,
    current_metadata: Option<MetadataUsage>,
}

impl<'a> BuildContext<'a> {
    pub fn new(source_name: impl Into<String>, interner: &'a mut Interner) -> Self {
        Self {
            interner,
            model: SemanticModel::new(source_name),
            scope_stack: Vec::new(),
            anon_counter: 0,
            rel_counter: 0,
            pending: PendingState::new(),
            current_metadata: None,
        }
    }

    pub fn current_scope(&self) -> Option<&IStr> {
        self.scope_stack.last()
    }

    /// Push a qualified id onto the scope stack.
    pub fn push_scope(&mut self, id: IStr) {
        self.scope_stack.push(id);
    }

    /// Pop the topmost scope. A no-op on an empty stack — must never fail.
    pub fn pop_scope(&mut self) {
        self.scope_stack.pop();
    }

    /// `scope + "::" + name`, or bare `name` at the root, interned.
    pub fn make_id(&mut self, name: Option<&str>) -> IStr {
        match name {
            Some(name) => {
                let scope = self.current_scope().map(|s| s.as_ref()).unwrap_or("");
                self.interner.intern_joined(scope, name)
            }
            None => {
                self.anon_counter += 1;
                let anon = format!("_anon_{}", self.anon_counter);
                let scope = self.current_scope().map(|s| s.as_ref()).unwrap_or("");
                self.interner.intern_joined(scope, &anon)
            }
        }
    }

    /// `scope + "::_{kindTag}_{n}"`, with the same scope rule as `makeId`.
    pub fn make_rel_id(&mut self, kind_tag: &str) -> IStr {
        self.rel_counter += 1;
        let label = format!("_{}_{}", kind_tag, self.rel_counter);
        let scope = self.current_scope().map(|s| s.as_ref()).unwrap_or("");
        self.interner.intern_joined(scope, &label)
    }

    /// Allocate a node: assigns `id`/`parent_id`, records location, and
    /// drains every pending slot into it. The caller still must call
    /// [`BuildContext::add_element`] to actually add it to the model — this
    /// split lets a caller discard a partially built node.
    pub fn build_node(&mut self, kind: NodeKind, name: Option<&str>, location: Location) -> Node {
        let id = self.make_id(name);
        let parent_id = self.current_scope().cloned();
        let mut node = Node::new(id, kind, location);
        node.parent_id = parent_id;
        node.name = name.map(|n| self.interner.intern(n));

        let inputs = self.pending.drain_for_node();
        node.is_abstract = inputs.abstract_;
        node.is_variation = inputs.variation;
        node.is_readonly = inputs.readonly;
        node.is_derived = inputs.derived;
        node.is_constant = inputs.constant;
        node.is_ref = inputs.ref_;
        node.is_end = inputs.end;
        node.is_parallel = inputs.parallel;
        node.is_exhibit = inputs.exhibit;
        node.is_asserted = inputs.asserted;
        node.is_negated = inputs.negated;
        node.is_standard_library = inputs.standard_library;
        node.is_public_explicit = inputs.public_explicit;
        node.is_event_occurrence = inputs.event_occurrence;
        node.has_enum_keyword = inputs.enum_keyword;
        node.has_action_keyword = inputs.action_keyword;
        node.has_connect_keyword = inputs.connect_keyword;
        node.portion_kind = inputs.portion_kind;
        node.ref_behavioral_keyword = inputs.ref_behavioral_keyword;
        node.direction = inputs.direction;
        node.visibility = inputs.visibility;
        node.multiplicity = match (inputs.multiplicity_lower, inputs.multiplicity_upper) {
            (Some(lower), Some(upper)) => Some(Multiplicity::new(lower, upper)),
            (Some(only), None) | (None, Some(only)) => Some(Multiplicity::new(only.clone(), only)),
            (None, None) => None,
        };
        node.default_value = inputs.default_value;
        node.has_default_keyword = inputs.has_default_keyword;
        node.leading_trivia = inputs.trivia;
        node.prefix_metadata = inputs.prefix_metadata;
        // Metadata captured before the node existed renders as a prefix
        // (`@Type { ... };` immediately before the element), per spec.md
        // §4.F step 2 vs. metadata attached after the fact via `addMetadata`.
        node.prefix_applied_metadata = inputs.metadata;
        node
    }

    pub fn add_element(&mut self, node: Node) -> Id<Node> {
        self.model.add_element(node)
    }

    pub fn add_relationship(
        &mut self,
        kind: RelationshipKind,
        source: Reference,
        target: Reference,
        location: Location,
    ) -> Id<Relationship> {
        let id = self.make_rel_id(kind.id_tag());
        self.model
            .add_relationship(Relationship::new(id, kind, source, target, location))
    }

    pub fn add_import(
        &mut self,
        kind: ImportKind,
        target: Reference,
        visibility: ImportVisibility,
        location: Location,
    ) -> Id<Import> {
        let owner_scope = self.current_scope().cloned();
        self.model
            .add_import(Import::new(kind, target, owner_scope, visibility, location))
    }

    pub fn add_alias(&mut self, name: IStr, target: Reference, location: Location) -> Id<Alias> {
        let owner_scope = self.current_scope().cloned();
        self.model.add_alias(Alias::new(name, target, owner_scope, location))
    }

    /// Attach a fully built metadata usage to a node already added to the
    /// model (as opposed to one still pending attachment via `buildNode`).
    pub fn add_metadata(&mut self, node_id: Id<Node>, usage: MetadataUsage) {
        if let Some(node) = self.model.elements.get_mut(node_id) {
            node.applied_metadata.push(usage);
        }
    }

    // --- capture* calls: write into the one-shot pending slots ---

    pub fn capture_abstract(&mut self) {
        self.pending.abstract_ = true;
    }
    pub fn capture_variation(&mut self) {
        self.pending.variation = true;
    }
    pub fn capture_readonly(&mut self) {
        self.pending.readonly = true;
    }
    pub fn capture_derived(&mut self) {
        self.pending.derived = true;
    }
    pub fn capture_constant(&mut self) {
        self.pending.constant = true;
    }
    pub fn capture_ref(&mut self) {
        self.pending.ref_ = true;
    }
    pub fn capture_end(&mut self) {
        self.pending.end = true;
    }
    pub fn capture_parallel(&mut self) {
        self.pending.parallel = true;
    }
    pub fn capture_exhibit(&mut self) {
        self.pending.exhibit = true;
    }
    pub fn capture_asserted(&mut self) {
        self.pending.asserted = true;
    }
    pub fn capture_negated(&mut self) {
        self.pending.negated = true;
    }
    pub fn capture_standard_library(&mut self) {
        self.pending.standard_library = true;
    }
    pub fn capture_public_explicit(&mut self) {
        self.pending.public_explicit = true;
    }
    pub fn capture_event_occurrence(&mut self) {
        self.pending.event_occurrence = true;
    }
    pub fn capture_enum_keyword(&mut self) {
        self.pending.enum_keyword = true;
    }
    pub fn capture_action_keyword(&mut self) {
        self.pending.action_keyword = true;
    }
    pub fn capture_connect_keyword(&mut self) {
        self.pending.connect_keyword = true;
    }
    pub fn capture_portion_kind(&mut self, kind: crate::model::PortionKind) {
        self.pending.portion_kind = kind;
    }
    pub fn capture_ref_behavioral_keyword(&mut self, keyword: &str) {
        self.pending.ref_behavioral_keyword = Some(self.interner.intern(keyword));
    }
    pub fn capture_direction(&mut self, direction: crate::model::Direction) {
        self.pending.direction = direction;
    }
    pub fn capture_visibility(&mut self, visibility: crate::model::Visibility) {
        self.pending.visibility = visibility;
    }
    pub fn capture_import_private(&mut self) {
        self.pending.import_private = true;
    }
    pub fn is_import_private(&self) -> bool {
        self.pending.import_private
    }
    pub fn capture_multiplicity(&mut self, lower: Option<&str>, upper: Option<&str>) {
        self.pending.multiplicity_lower = lower.map(|s| self.interner.intern(s));
        self.pending.multiplicity_upper = upper.map(|s| self.interner.intern(s));
    }
    pub fn capture_default_value(&mut self, text: String, has_keyword: bool) {
        self.pending.default_value = Some(text);
        self.pending.has_default_keyword = has_keyword;
    }
    pub fn capture_prefix_metadata(&mut self, reference: Reference) {
        self.pending.prefix_metadata.push(reference);
    }

    pub fn append_trivia(&mut self, trivia: crate::model::Trivia) {
        self.pending.trivia.push(trivia);
    }

    /// Empty every flag-like pending slot without touching accumulated
    /// trivia, per spec.md §4.C's `clearPending`.
    pub fn clear_pending(&mut self) {
        self.pending.clear_flags();
    }

    // --- metadata usage construction (two-phase API) ---

    pub fn start_metadata(&mut self, type_ref: Reference, location: Location) {
        self.current_metadata = Some(MetadataUsage::new(type_ref, location));
    }

    pub fn current_metadata_add_feature(&mut self, name: IStr, value: Option<String>) {
        if let Some(usage) = &mut self.current_metadata {
            usage.features.push(MetadataFeature::new(name, value));
        }
    }

    pub fn add_metadata_about(&mut self, target: Reference) {
        if let Some(usage) = &mut self.current_metadata {
            usage.about.push(target);
        }
    }

    /// End the in-progress metadata usage and attach it to the node being
    /// assembled (drained by the next `buildNode`).
    pub fn end_metadata_to_pending(&mut self) {
        if let Some(usage) = self.current_metadata.take() {
            self.pending.metadata.push(usage);
        }
    }

    /// End the in-progress metadata usage and attach it directly to an
    /// already-added node.
    pub fn end_metadata_to_node(&mut self, node_id: Id<Node>) {
        if let Some(usage) = self.current_metadata.take() {
            self.add_metadata(node_id, usage);
        }
    }

    pub fn intern(&mut self, text: &str) -> IStr {
        self.interner.intern(text)
    }

    pub fn node_id_for(&self, id: &str) -> Option<Id<Node>> {
        self.model.node_id_for(id)
    }

    pub fn node_mut(&mut self, id: Id<Node>) -> Option<&mut Node> {
        self.model.elements.get_mut(id)
    }

    /// Seal the model. The context must not be used afterwards.
    pub fn finalize(self) -> SemanticModel {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Position;

    fn loc() -> Location {
        Location::new(0, Position::default())
    }

    #[test]
    fn make_id_concatenates_scope_and_name() {
        let mut interner = Interner::new();
        let mut ctx = BuildContext::new("test.sysml", &mut interner);
        let pkg_id = ctx.make_id(Some("P"));
        assert_eq!(pkg_id.as_ref(), "P");
        ctx.push_scope(pkg_id);
        let child_id = ctx.make_id(Some("Child"));
        assert_eq!(child_id.as_ref(), "P::Child");
    }

    #[test]
    fn anonymous_id_increments_counter_per_scope() {
        let mut interner = Interner::new();
        let mut ctx = BuildContext::new("test.sysml", &mut interner);
        let pkg_id = ctx.make_id(Some("P"));
        ctx.push_scope(pkg_id);
        let anon1 = ctx.make_id(None);
        let anon2 = ctx.make_id(None);
        assert_eq!(anon1.as_ref(), "P::_anon_1");
        assert_eq!(anon2.as_ref(), "P::_anon_2");
    }

    #[test]
    fn pop_scope_on_empty_stack_is_a_no_op() {
        let mut interner = Interner::new();
        let mut ctx = BuildContext::new("test.sysml", &mut interner);
        ctx.pop_scope();
        ctx.pop_scope();
        assert!(ctx.current_scope().is_none());
    }

    #[test]
    fn build_node_drains_pending_modifiers_and_clears_for_next_sibling() {
        let mut interner = Interner::new();
        let mut ctx = BuildContext::new("test.sysml", &mut interner);
        ctx.capture_abstract();
        let first = ctx.build_node(NodeKind::PartDef, Some("A"), loc());
        assert!(first.is_abstract);

        let second = ctx.build_node(NodeKind::PartDef, Some("B"), loc());
        assert!(!second.is_abstract, "modifiers must not leak across siblings");
    }

    #[test]
    fn anonymous_scenario_from_spec_seed() {
        // package P { part; } -> node id P::_anon_1, name absent.
        let mut interner = Interner::new();
        let mut ctx = BuildContext::new("test.sysml", &mut interner);
        let pkg = ctx.build_node(NodeKind::Package, Some("P"), loc());
        ctx.push_scope(pkg.id.clone());
        let part = ctx.build_node(NodeKind::PartDef, None, loc());
        assert_eq!(part.id.as_ref(), "P::_anon_1");
        assert!(part.name.is_none());
    }
}
