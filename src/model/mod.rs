//! Pure data: nodes, relationships, imports, aliases, trivia, metadata, and
//! body statements (component B). Nothing in this module mutates itself —
//! assembly is the build context's job (`crate::build`).

mod alias;
mod import;
mod kind;
mod metadata;
mod multiplicity;
mod node;
mod reference;
mod relationship;
mod semantic_model;
mod statement;
mod trivia;

pub use alias::Alias;
pub use import::{Import, ImportKind, ImportVisibility};
pub use kind::NodeKind;
pub use metadata::{MetadataFeature, MetadataUsage};
pub use multiplicity::Multiplicity;
pub use node::{Direction, NamedComment, Node, PortionKind, TextualRepresentation, Visibility};
pub use reference::Reference;
pub use relationship::{Relationship, RelationshipKind};
pub use semantic_model::{SemanticModel, SourceFile};
pub use statement::{BodyStatement, StatementKind};
pub use trivia::{Trivia, TriviaKind};
