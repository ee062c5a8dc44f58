//! Alias declarations (`alias Name for Target::Path;`).

use crate::base::{IStr, Location};
use crate::model::Reference;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alias {
    pub name: IStr,
    pub target: Reference,
    pub owner_scope: Option<IStr>,
    pub location: Location,
}

impl Alias {
    pub fn new(name: IStr, target: Reference, owner_scope: Option<IStr>, location: Location) -> Self {
        Self {
            name,
            target,
            owner_scope,
            location,
        }
    }
}
