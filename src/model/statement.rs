//! Body statements: the closed set of non-declarative constructs that can
//! appear inside a node's body (actions, states, constraints, use cases, …).

use crate::base::Location;
use crate::model::Reference;

/// The closed set of body-statement kinds, per spec.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Bind,
    Connect,
    Flow,
    Allocate,
    Succession,
    First,
    Then,
    Entry,
    Exit,
    Do,
    Transition,
    Accept,
    Send,
    Assign,
    If,
    While,
    For,
    Loop,
    Terminate,
    Merge,
    Decide,
    Join,
    Fork,
    ResultExpr,
    MetadataUsage,
    ShorthandFeature,
    Require,
    Assume,
    Subject,
    EndMember,
    Return,
    Actor,
    Stakeholder,
    Objective,
    Frame,
    Satisfy,
    Include,
    Expose,
    Render,
    Verify,
}

/// A single body statement. Structured fields are populated when the
/// statement kind gives them meaning; `raw_text` always preserves the
/// original fragment so the writer can fall back to it losslessly (spec.md
/// §4.F "Statement write").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BodyStatement {
    pub kind: StatementKind,
    pub source: Option<Reference>,
    pub target: Option<Reference>,
    pub guard: Option<String>,
    pub payload: Option<String>,
    pub raw_text: String,
    pub location: Location,
}

impl BodyStatement {
    pub fn new(kind: StatementKind, raw_text: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            source: None,
            target: None,
            guard: None,
            payload: None,
            raw_text: raw_text.into(),
            location,
        }
    }
}
