//! Import declarations.

use crate::base::{IStr, Location};
use crate::model::Reference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// A single-element import: `import Pkg::Thing;`
    Single,
    /// A direct-children wildcard: `import Pkg::*;`
    Wildcard,
    /// A recursive-descendant wildcard: `import Pkg::**;`
    Recursive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportVisibility {
    Private,
    ExplicitPublic,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Import {
    pub kind: ImportKind,
    pub target: Reference,
    /// The enclosing node's id, or absent when the import is top-level.
    pub owner_scope: Option<IStr>,
    pub visibility: ImportVisibility,
    pub location: Location,
}

impl Import {
    pub fn new(
        kind: ImportKind,
        target: Reference,
        owner_scope: Option<IStr>,
        visibility: ImportVisibility,
        location: Location,
    ) -> Self {
        Self {
            kind,
            target,
            owner_scope,
            visibility,
            location,
        }
    }
}
