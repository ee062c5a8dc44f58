//! Independent relationship edges (as opposed to the type-relation arrays
//! embedded directly on a [`crate::model::Node`]).

use crate::base::{IStr, Location};
use crate::model::Reference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Specialization,
    Redefinition,
    Reference,
    Connection,
    Flow,
    Allocation,
    Satisfy,
    Include,
}

impl RelationshipKind {
    /// The id-prefix tag used by `makeRelId` (`{scope}::_{tag}_{n}`).
    pub fn id_tag(self) -> &'static str {
        match self {
            RelationshipKind::Specialization => "spec",
            RelationshipKind::Redefinition => "redef",
            RelationshipKind::Reference => "ref",
            RelationshipKind::Connection => "conn",
            RelationshipKind::Flow => "flow",
            RelationshipKind::Allocation => "alloc",
            RelationshipKind::Satisfy => "satisfy",
            RelationshipKind::Include => "include",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub id: IStr,
    pub kind: RelationshipKind,
    pub source: Reference,
    pub target: Reference,
    pub location: Location,
}

impl Relationship {
    pub fn new(id: IStr, kind: RelationshipKind, source: Reference, target: Reference, location: Location) -> Self {
        Self {
            id,
            kind,
            source,
            target,
            location,
        }
    }
}
