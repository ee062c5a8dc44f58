//! Concrete seed scenarios for the round-trip writer (anonymous ids,
//! conjugation, typing vs redefinition, multiplicity spacing).

use syster_core::base::{Interner, Location, Position};
use syster_core::core::events::{Event, TypeRelationRole};
use syster_core::model::{ImportVisibility, Multiplicity, NodeKind, Reference};
use syster_core::{drive, CanonicalWriter, WriteOptions};

fn loc() -> Location {
    Location::new(0, Position::default())
}

fn write(model: &syster_core::SemanticModel) -> String {
    CanonicalWriter::new(WriteOptions::default()).write_model(model)
}

#[test]
fn anonymous_part_under_a_package_gets_the_first_anon_id() {
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
    let model = drive("t.sysml", &mut interner, events);

    let anon = model.find_by_id("P::_anon_1").expect("anonymous part not found");
    assert!(anon.name.is_none());
}

#[test]
fn conjugated_port_typing_survives_a_write() {
    let mut interner = Interner::new();
    let events = vec![
        Event::CreateNode {
            kind: NodeKind::InterfaceDef,
            name: Some(interner.intern("I")),
            location: loc(),
        },
        Event::EnterScope(interner.intern("I")),
        Event::CreateNode {
            kind: NodeKind::EndFeature,
            name: Some(interner.intern("client")),
            location: loc(),
        },
        Event::TypeRelation {
            role: TypeRelationRole::TypedBy,
            reference: Reference::conjugated(interner.intern("Port"), loc()),
        },
        Event::LeaveScope,
    ];
    let model = drive("t.sysml", &mut interner, events);

    let out = write(&model);
    assert!(out.contains("~Port"), "expected conjugated reference, got: {out}");
}

#[test]
fn redefinition_and_typing_are_distinct_operators() {
    let mut interner = Interner::new();
    let events = vec![
        Event::CreateNode {
            kind: NodeKind::PartUsage,
            name: Some(interner.intern("x")),
            location: loc(),
        },
        Event::TypeRelation {
            role: TypeRelationRole::Redefines,
            reference: Reference::new(interner.intern("database"), loc()),
        },
        Event::TypeRelation {
            role: TypeRelationRole::TypedBy,
            reference: Reference::new(interner.intern("PostgreSQL"), loc()),
        },
    ];
    let model = drive("t.sysml", &mut interner, events);

    let out = write(&model);
    assert!(out.contains(":>>"), "expected a redefinition operator, got: {out}");
    assert!(out.contains(": PostgreSQL"), "expected a typing operator, got: {out}");
    assert!(
        !out.contains("database, PostgreSQL"),
        "redefines and typed_by must not be merged into one operator group: {out}"
    );
}

#[test]
fn multiplicity_keeps_one_leading_space_before_the_bracket() {
    let mut interner = Interner::new();
    let events = vec![
        Event::CaptureMultiplicity {
            lower: interner.intern("0"),
            upper: interner.intern("1"),
        },
        Event::CreateNode {
            kind: NodeKind::AttributeUsage,
            name: Some(interner.intern("x")),
            location: loc(),
        },
        Event::TypeRelation {
            role: TypeRelationRole::TypedBy,
            reference: Reference::new(interner.intern("String"), loc()),
        },
    ];
    let model = drive("t.sysml", &mut interner, events);

    let out = write(&model);
    assert!(out.contains("String [0..1]"), "got: {out}");
}

#[test]
fn top_level_import_is_rendered_before_every_element() {
    let mut interner = Interner::new();
    let events = vec![
        Event::AddImport {
            kind: syster_core::model::ImportKind::Wildcard,
            target: Reference::new(interner.intern("Other"), loc()),
            visibility: ImportVisibility::Private,
            location: loc(),
        },
        Event::CreateNode {
            kind: NodeKind::Package,
            name: Some(interner.intern("P")),
            location: loc(),
        },
    ];
    let model = drive("t.sysml", &mut interner, events);

    let out = write(&model);
    let import_pos = out.find("import Other::*;").expect("import missing");
    let package_pos = out.find("package P;").expect("package missing");
    assert!(import_pos < package_pos);
}

#[test]
fn multiplicity_ctor_matches_expected_bounds() {
    let lower: syster_core::IStr = "0".into();
    let upper: syster_core::IStr = "*".into();
    let m = Multiplicity::new(lower, upper);
    assert_eq!(m.lower.as_ref(), "0");
    assert_eq!(m.upper.as_ref(), "*");
}
