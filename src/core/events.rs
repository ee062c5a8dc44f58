//! The parse-event contract: the forward stream the build context consumes.
//!
//! Producing this stream is the job of the PEG grammar and lexer, which are
//! out of scope here (spec.md §1); this module only names the shape of the
//! contract between that external parser and [`crate::build::BuildContext`].

use crate::base::{IStr, Location};
use crate::model::{
    BodyStatement, Direction, ImportKind, ImportVisibility, NamedComment, NodeKind, PortionKind,
    Reference, RelationshipKind, TextualRepresentation, Visibility,
};

/// One boolean or small-payload modifier capture, consumed by the next
/// `CreateNode` event's `buildNode` call (spec.md §4.C "Pending slots").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    Abstract,
    Variation,
    Readonly,
    Derived,
    Constant,
    Ref,
    End,
    Parallel,
    Exhibit,
    Asserted,
    Negated,
    StandardLibrary,
    PublicExplicit,
    EventOccurrence,
    EnumKeyword,
    ActionKeyword,
    ConnectKeyword,
    Portion(PortionKind),
    RefBehavioralKeyword(IStr),
}

/// Which type-relation array a `TypeRelation` event appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRelationRole {
    TypedBy,
    Specializes,
    Redefines,
    References,
}

/// One event in the forward stream produced by the external parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    EnterScope(IStr),
    LeaveScope,

    CreateNode {
        kind: NodeKind,
        name: Option<IStr>,
        location: Location,
    },

    /// Append a reference to one of the node's type-relation arrays. Applies
    /// to the node most recently produced by `CreateNode`.
    TypeRelation {
        role: TypeRelationRole,
        reference: Reference,
    },

    EmitRelationship {
        kind: RelationshipKind,
        source: Reference,
        target: Reference,
        location: Location,
    },

    AddImport {
        kind: ImportKind,
        target: Reference,
        visibility: ImportVisibility,
        location: Location,
    },

    AddAlias {
        name: IStr,
        target: Reference,
        location: Location,
    },

    AppendTrivia(crate::model::Trivia),

    AttachDocumentation {
        text: String,
        location: Location,
    },
    AttachConnectorPart(String),
    AttachResultExpression(String),
    AttachBodyStatement(BodyStatement),
    AttachNamedComment(NamedComment),
    AttachTextualRepresentation(TextualRepresentation),

    CaptureModifier(Modifier),
    CaptureDirection(Direction),
    CaptureVisibility(Visibility),
    CaptureImportPrivate(bool),
    CaptureMultiplicity {
        lower: IStr,
        upper: IStr,
    },
    CaptureDefaultValue {
        text: String,
        has_keyword: bool,
    },

    AddPrefixMetadata(Reference),

    StartMetadata {
        type_ref: Reference,
        location: Location,
    },
    MetadataAddFeature {
        name: IStr,
        value: Option<String>,
    },
    MetadataAddAbout(Reference),
    /// Finish the in-progress metadata usage and attach it to the node being
    /// assembled next (a prefix `@Type { ... };`, spec.md §4.F step 2).
    EndMetadataPending,
    /// Finish the in-progress metadata usage and attach it to an
    /// already-added node, addressed by its fully-qualified id (a body
    /// member `@Type { ... };`).
    EndMetadataForNode(IStr),
}
