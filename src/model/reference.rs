//! Qualified references: the `::`-separated paths nodes, relationships,
//! imports, aliases, and metadata usages use to point at named elements.

use crate::base::{IStr, Location};

/// A reference to a named element, possibly conjugated (`~Port`).
///
/// Every reference-typed field carries its own `conjugated` flag rather than
/// a parallel array, since spec.md §3 singles out `typed_by` as the one
/// array that needs it; keeping the flag on the type itself means every
/// other user of `Reference` simply leaves it `false` instead of needing a
/// second, mostly-unused array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub path: IStr,
    pub conjugated: bool,
    pub location: Location,
}

impl Reference {
    pub fn new(path: IStr, location: Location) -> Self {
        Self {
            path,
            conjugated: false,
            location,
        }
    }

    pub fn conjugated(path: IStr, location: Location) -> Self {
        Self {
            path,
            conjugated: true,
            location,
        }
    }
}
