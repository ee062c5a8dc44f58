//! Direct-child vs recursive-descendant query matching, and `--select`/
//! `--delete` pruning with stub-scope preservation.

use syster_core::base::{Interner, Location, Position};
use syster_core::core::events::Event;
use syster_core::model::NodeKind;
use syster_core::pipeline::{delete, select};
use syster_core::query::{execute, get_ancestors, Pattern};
use syster_core::{drive, CanonicalWriter, WriteOptions};

fn loc() -> Location {
    Location::new(0, Position::default())
}

fn build_three_level_model(interner: &mut Interner) -> syster_core::SemanticModel {
    let events = vec![
        Event::CreateNode {
            kind: NodeKind::Package,
            name: Some(interner.intern("Pkg")),
            location: loc(),
        },
        Event::EnterScope(interner.intern("Pkg")),
        Event::CreateNode {
            kind: NodeKind::PartDef,
            name: Some(interner.intern("A")),
            location: loc(),
        },
        Event::EnterScope(interner.intern("Pkg::A")),
        Event::CreateNode {
            kind: NodeKind::PartUsage,
            name: Some(interner.intern("Child")),
            location: loc(),
        },
        Event::LeaveScope,
        Event::LeaveScope,
    ];
    drive("t.sysml", interner, events)
}

#[test]
fn direct_child_pattern_matches_only_the_one_level_deeper_id() {
    let mut interner = Interner::new();
    let model = build_three_level_model(&mut interner);

    let patterns = vec![Pattern::parse("Pkg::*")];
    let result = execute(&patterns, &[&model]);
    assert_eq!(result.len(), 1);
    assert!(result.contains("Pkg::A"));
}

#[test]
fn recursive_pattern_matches_the_base_and_every_descendant() {
    let mut interner = Interner::new();
    let model = build_three_level_model(&mut interner);

    let patterns = vec![Pattern::parse("Pkg::**")];
    let result = execute(&patterns, &[&model]);
    assert_eq!(result.len(), 3);
    assert!(result.contains("Pkg"));
    assert!(result.contains("Pkg::A"));
    assert!(result.contains("Pkg::A::Child"));
}

#[test]
fn select_renders_a_stub_scope_around_a_deep_selection() {
    let mut interner = Interner::new();
    let model = build_three_level_model(&mut interner);

    let patterns = vec![Pattern::parse("Pkg::A::Child")];
    let result = execute(&patterns, &[&model]);
    let ancestors = get_ancestors(&result);
    let pruned = select(&model, &result, &ancestors);

    assert!(pruned.find_by_id("Pkg::A::Child").is_some());
    assert!(pruned.find_by_id("Pkg::A").is_some());
    assert!(pruned.find_by_id("Pkg").is_some());

    let out = CanonicalWriter::new(WriteOptions::default()).write_model(&pruned);
    assert!(out.contains("part Child;"), "got: {out}");
    assert!(out.contains("part def A"), "stub scope missing from output: {out}");
}

#[test]
fn delete_drops_only_the_matched_subtree() {
    let mut interner = Interner::new();
    let model = build_three_level_model(&mut interner);

    let patterns = vec![Pattern::parse("Pkg::A::**")];
    let result = execute(&patterns, &[&model]);
    let pruned = delete(&model, &result);

    assert!(pruned.find_by_id("Pkg").is_some());
    assert!(pruned.find_by_id("Pkg::A").is_none());
    assert!(pruned.find_by_id("Pkg::A::Child").is_none());
}
