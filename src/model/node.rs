//! The `Node` entity: a definition, usage, or package-like element.

use crate::base::{IStr, Location};
use crate::core::Id;
use crate::model::kind::NodeKind;
use crate::model::metadata::MetadataUsage;
use crate::model::multiplicity::Multiplicity;
use crate::model::reference::Reference;
use crate::model::statement::BodyStatement;
use crate::model::trivia::Trivia;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    None,
    In,
    Out,
    Inout,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Default,
    Public,
    Private,
    Protected,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Default
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortionKind {
    None,
    Snapshot,
    Timeslice,
}

impl Default for PortionKind {
    fn default() -> Self {
        PortionKind::None
    }
}

/// A named comment (`comment Name about Target /* ... */`), kept distinct
/// from leading/trailing trivia because it carries its own target list and
/// is sorted into the body alongside children rather than attached to a
/// single node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedComment {
    pub name: Option<IStr>,
    pub about: Vec<Reference>,
    pub text: String,
    pub location: Location,
}

/// A `language "..." """ ... """;` textual representation block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextualRepresentation {
    pub language: Option<IStr>,
    pub text: String,
    pub location: Location,
}

/// A definition, usage, or package-like element.
///
/// Field layout follows spec.md §3's "Node" entity description; grouping
/// mirrors the teacher's `HirSymbol` in `hir/symbols/types.rs` (plain data,
/// classification pushed onto [`NodeKind`] rather than onto `Node` itself).
#[derive(Debug, Clone)]
pub struct Node {
    pub id: IStr,
    pub kind: NodeKind,
    pub name: Option<IStr>,
    pub parent_id: Option<IStr>,

    // Type-relation arrays (spec.md §3, §4.F step 13 operator groups).
    pub typed_by: Vec<Reference>,
    pub specializes: Vec<Reference>,
    pub redefines: Vec<Reference>,
    pub references: Vec<Reference>,

    // Modifiers.
    pub is_abstract: bool,
    pub is_variation: bool,
    pub is_readonly: bool,
    pub is_derived: bool,
    pub is_constant: bool,
    pub is_ref: bool,
    pub is_end: bool,
    pub is_parallel: bool,
    pub is_exhibit: bool,
    pub is_asserted: bool,
    pub is_negated: bool,
    pub is_standard_library: bool,
    pub is_public_explicit: bool,
    pub is_event_occurrence: bool,
    pub has_enum_keyword: bool,
    pub has_action_keyword: bool,
    pub has_connect_keyword: bool,
    pub portion_kind: PortionKind,
    pub ref_behavioral_keyword: Option<IStr>,
    pub direction: Direction,
    pub visibility: Visibility,

    pub multiplicity: Option<Multiplicity>,

    pub default_value: Option<String>,
    pub has_default_keyword: bool,

    pub leading_trivia: Vec<Trivia>,
    pub trailing_trivia: Option<Trivia>,
    pub documentation: Option<(String, Location)>,

    pub applied_metadata: Vec<MetadataUsage>,
    pub prefix_metadata: Vec<Reference>,
    pub prefix_applied_metadata: Vec<MetadataUsage>,
    pub named_comments: Vec<NamedComment>,
    pub textual_representations: Vec<TextualRepresentation>,

    pub body_statements: Vec<BodyStatement>,
    pub children: Vec<Id<Node>>,
    pub result_expression: Option<String>,

    /// Raw `connect`/`allocate`/`flow` payload text.
    pub connector_part: Option<String>,

    pub location: Location,
}

impl Node {
    pub fn new(id: IStr, kind: NodeKind, location: Location) -> Self {
        Self {
            id,
            kind,
            name: None,
            parent_id: None,
            typed_by: Vec::new(),
            specializes: Vec::new(),
            redefines: Vec::new(),
            references: Vec::new(),
            is_abstract: false,
            is_variation: false,
            is_readonly: false,
            is_derived: false,
            is_constant: false,
            is_ref: false,
            is_end: false,
            is_parallel: false,
            is_exhibit: false,
            is_asserted: false,
            is_negated: false,
            is_standard_library: false,
            is_public_explicit: false,
            is_event_occurrence: false,
            has_enum_keyword: false,
            has_action_keyword: false,
            has_connect_keyword: false,
            portion_kind: PortionKind::default(),
            ref_behavioral_keyword: None,
            direction: Direction::default(),
            visibility: Visibility::default(),
            multiplicity: None,
            default_value: None,
            has_default_keyword: false,
            leading_trivia: Vec::new(),
            trailing_trivia: None,
            documentation: None,
            applied_metadata: Vec::new(),
            prefix_metadata: Vec::new(),
            prefix_applied_metadata: Vec::new(),
            named_comments: Vec::new(),
            textual_representations: Vec::new(),
            body_statements: Vec::new(),
            children: Vec::new(),
            result_expression: None,
            connector_part: None,
            location,
        }
    }

    pub fn is_package(&self) -> bool {
        self.kind.is_package()
    }

    pub fn is_definition(&self) -> bool {
        self.kind.is_definition()
    }

    pub fn is_usage(&self) -> bool {
        self.kind.is_usage()
    }

    pub fn is_relationship(&self) -> bool {
        self.kind.is_relationship()
    }

    /// Append to `typed_by` (operator `:`). The conjugation flag travels on
    /// `reference` itself (spec.md §3).
    pub fn add_typed_by(&mut self, reference: Reference) {
        self.typed_by.push(reference);
    }

    /// Append to `specializes` (operator `:>`).
    pub fn add_specializes(&mut self, reference: Reference) {
        self.specializes.push(reference);
    }

    /// Append to `redefines` (operator `:>>`).
    pub fn add_redefines(&mut self, reference: Reference) {
        self.redefines.push(reference);
    }

    /// Append to `references` (operator `::>`).
    pub fn add_references(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    /// Whether this node's own contribution to the body's unified array
    /// (spec.md §4.F "Body write") is empty. Does not account for imports or
    /// aliases owned by this scope, which live on the model and must be
    /// checked by the writer alongside this.
    pub fn has_empty_body(&self) -> bool {
        self.documentation.is_none()
            && self.applied_metadata.is_empty()
            && self.named_comments.is_empty()
            && self.textual_representations.is_empty()
            && self.body_statements.is_empty()
            && self.children.is_empty()
            && self.result_expression.is_none()
    }
}
