//! Drives a [`BuildContext`] from a stream of [`Event`]s.
//!
//! The context's operations (spec.md §4.C) are the specified surface; this
//! module is the glue an embedder uses to turn the external parser's actual
//! event stream into those calls. It is not itself part of the contract —
//! a caller with a different event shape can drive `BuildContext` directly.

use crate::base::Interner;
use crate::build::context::BuildContext;
use crate::core::events::{Event, Modifier, TypeRelationRole};
use crate::model::SemanticModel;

/// Assemble a complete [`SemanticModel`] from an event stream.
pub fn drive(source_name: impl Into<String>, interner: &mut Interner, events: impl IntoIterator<Item = Event>) -> SemanticModel {
    let mut ctx = BuildContext::new(source_name, interner);
    // Parallels `ctx`'s scope stack: for each open scope, the ids of child
    // nodes created directly within it, attached to the parent on `LeaveScope`.
    let mut child_stack: Vec<Vec<crate::core::Id<crate::model::Node>>> = Vec::new();
    let mut current_node_id: Option<crate::core::Id<crate::model::Node>> = None;

    for event in events {
        match event {
            Event::EnterScope(id) => {
                ctx.push_scope(id);
                child_stack.push(Vec::new());
            }
            Event::LeaveScope => {
                let scope_owner = ctx.current_scope().and_then(|id| ctx.node_id_for(id.as_ref()));
                ctx.pop_scope();
                if let Some(children) = child_stack.pop() {
                    if let Some(parent_id) = scope_owner {
                        if let Some(parent) = ctx.node_mut(parent_id) {
                            parent.children.extend(children);
                        }
                    }
                }
            }
            Event::CreateNode { kind, name, location } => {
                let node = ctx.build_node(kind, name.as_deref(), location);
                let node_id = ctx.add_element(node);
                current_node_id = Some(node_id);
                if let Some(siblings) = child_stack.last_mut() {
                    siblings.push(node_id);
                }
            }
            Event::TypeRelation { role, reference } => {
                if let Some(node_id) = current_node_id {
                    if let Some(node) = ctx.node_mut(node_id) {
                        match role {
                            TypeRelationRole::TypedBy => node.add_typed_by(reference),
                            TypeRelationRole::Specializes => node.add_specializes(reference),
                            TypeRelationRole::Redefines => node.add_redefines(reference),
                            TypeRelationRole::References => node.add_references(reference),
                        }
                    }
                }
            }
            Event::EmitRelationship {
                kind,
                source,
                target,
                location,
            } => {
                ctx.add_relationship(kind, source, target, location);
            }
            Event::AddImport {
                kind,
                target,
                visibility,
                location,
            } => {
                ctx.add_import(kind, target, visibility, location);
            }
            Event::AddAlias { name, target, location } => {
                ctx.add_alias(name, target, location);
            }
            Event::AppendTrivia(trivia) => ctx.append_trivia(trivia),
            Event::AttachDocumentation { text, location } => {
                if let Some(node) = current_node_id.and_then(|id| ctx.node_mut(id)) {
                    node.documentation = Some((text, location));
                }
            }
            Event::AttachConnectorPart(text) => {
                if let Some(node) = current_node_id.and_then(|id| ctx.node_mut(id)) {
                    node.connector_part = Some(text);
                }
            }
            Event::AttachResultExpression(text) => {
                if let Some(node) = current_node_id.and_then(|id| ctx.node_mut(id)) {
                    node.result_expression = Some(text);
                }
            }
            Event::AttachBodyStatement(statement) => {
                if let Some(node) = current_node_id.and_then(|id| ctx.node_mut(id)) {
                    node.body_statements.push(statement);
                }
            }
            Event::AttachNamedComment(comment) => {
                if let Some(node) = current_node_id.and_then(|id| ctx.node_mut(id)) {
                    node.named_comments.push(comment);
                }
            }
            Event::AttachTextualRepresentation(representation) => {
                if let Some(node) = current_node_id.and_then(|id| ctx.node_mut(id)) {
                    node.textual_representations.push(representation);
                }
            }
            Event::CaptureModifier(modifier) => apply_modifier(&mut ctx, modifier),
            Event::CaptureDirection(direction) => ctx.capture_direction(direction),
            Event::CaptureVisibility(visibility) => ctx.capture_visibility(visibility),
            Event::CaptureImportPrivate(is_private) => {
                if is_private {
                    ctx.capture_import_private();
                }
            }
            Event::CaptureMultiplicity { lower, upper } => {
                ctx.capture_multiplicity(Some(&lower), Some(&upper));
            }
            Event::CaptureDefaultValue { text, has_keyword } => {
                ctx.capture_default_value(text, has_keyword);
            }
            Event::AddPrefixMetadata(reference) => ctx.capture_prefix_metadata(reference),
            Event::StartMetadata { type_ref, location } => ctx.start_metadata(type_ref, location),
            Event::MetadataAddFeature { name, value } => ctx.current_metadata_add_feature(name, value),
            Event::MetadataAddAbout(target) => ctx.add_metadata_about(target),
            Event::EndMetadataPending => ctx.end_metadata_to_pending(),
            Event::EndMetadataForNode(id) => {
                if let Some(node_id) = ctx.node_id_for(&id) {
                    ctx.end_metadata_to_node(node_id);
                }
            }
        }
    }

    ctx.finalize()
}

fn apply_modifier(ctx: &mut BuildContext<'_>, modifier: Modifier) {
    match modifier {
        Modifier::Abstract => ctx.capture_abstract(),
        Modifier::Variation => ctx.capture_variation(),
        Modifier::Readonly => ctx.capture_readonly(),
        Modifier::Derived => ctx.capture_derived(),
        Modifier::Constant => ctx.capture_constant(),
        Modifier::Ref => ctx.capture_ref(),
        Modifier::End => ctx.capture_end(),
        Modifier::Parallel => ctx.capture_parallel(),
        Modifier::Exhibit => ctx.capture_exhibit(),
        Modifier::Asserted => ctx.capture_asserted(),
        Modifier::Negated => ctx.capture_negated(),
        Modifier::StandardLibrary => ctx.capture_standard_library(),
        Modifier::PublicExplicit => ctx.capture_public_explicit(),
        Modifier::EventOccurrence => ctx.capture_event_occurrence(),
        Modifier::EnumKeyword => ctx.capture_enum_keyword(),
        Modifier::ActionKeyword => ctx.capture_action_keyword(),
        Modifier::ConnectKeyword => ctx.capture_connect_keyword(),
        Modifier::Portion(kind) => ctx.capture_portion_kind(kind),
        Modifier::RefBehavioralKeyword(keyword) => ctx.capture_ref_behavioral_keyword(&keyword),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Location, Position};
    use crate::model::NodeKind;

    fn loc() -> Location {
        Location::new(0, Position::default())
    }

    #[test]
    fn enter_leave_scope_attaches_children_to_parent() {
        let mut interner = Interner::new();
        let events = vec![
            Event::CreateNode {
                kind: NodeKind::Package,
                name: Some(interner.intern("P")),
                location: loc(),
            },
            Event::EnterScope(interner.intern("P")),
            Event::CreateNode {
                kind: NodeKind::PartUsage,
                name: None,
                location: loc(),
            },
            Event::LeaveScope,
        ];
        let model = drive("test.sysml", &mut interner, events);
        let pkg = model.find_by_id("P").unwrap();
        assert_eq!(pkg.children.len(), 1);
        let child_id = pkg.children[0];
        assert_eq!(model.elements[child_id].id.as_ref(), "P::_anon_1");
    }
}
