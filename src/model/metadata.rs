//! Metadata usages (`@Type { f = v; … }` and `@Type;`).

use crate::base::{IStr, Location};
use crate::model::Reference;

/// One `name = value` (or bare `name`) feature inside a metadata usage body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataFeature {
    pub name: IStr,
    pub value: Option<String>,
}

impl MetadataFeature {
    pub fn new(name: IStr, value: Option<String>) -> Self {
        Self { name, value }
    }
}

/// A single applied metadata usage: `@TypeRef { features… }` with an
/// optional list of `about` targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataUsage {
    pub type_ref: Reference,
    pub features: Vec<MetadataFeature>,
    pub about: Vec<Reference>,
    pub location: Location,
}

impl MetadataUsage {
    pub fn new(type_ref: Reference, location: Location) -> Self {
        Self {
            type_ref,
            features: Vec::new(),
            about: Vec::new(),
            location,
        }
    }
}
