//! The pending-slot record: a one-shot buffer drained by the next
//! `buildNode` call.
//!
//! Per the design note in spec.md §9, this is deliberately a plain struct
//! reset by a dedicated helper, not a stack — nothing in the grammar this
//! targets nests modifiers on a single element.

use crate::model::{Direction, MetadataUsage, PortionKind, Reference, Trivia, Visibility};

/// One-shot fields captured by `capture*` calls and consumed, atomically,
/// by the next `buildNode`.
#[derive(Debug, Default)]
pub struct PendingState {
    pub abstract_: bool,
    pub variation: bool,
    pub readonly: bool,
    pub derived: bool,
    pub constant: bool,
    pub ref_: bool,
    pub end: bool,
    pub parallel: bool,
    pub exhibit: bool,
    pub asserted: bool,
    pub negated: bool,
    pub standard_library: bool,
    pub public_explicit: bool,
    pub event_occurrence: bool,
    pub enum_keyword: bool,
    pub action_keyword: bool,
    pub connect_keyword: bool,
    pub portion_kind: PortionKind,
    pub ref_behavioral_keyword: Option<crate::base::IStr>,
    pub direction: Direction,
    pub visibility: Visibility,
    pub import_private: bool,

    pub multiplicity_lower: Option<crate::base::IStr>,
    pub multiplicity_upper: Option<crate::base::IStr>,

    pub default_value: Option<String>,
    pub has_default_keyword: bool,

    pub prefix_metadata: Vec<Reference>,
    pub metadata: Vec<MetadataUsage>,

    pub trivia: Vec<Trivia>,
}

impl PendingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty every flag-like slot, but not the accumulating trivia buffer —
    /// matches the `clearPending` contract in spec.md §4.C.
    pub fn clear_flags(&mut self) {
        self.abstract_ = false;
        self.variation = false;
        self.readonly = false;
        self.derived = false;
        self.constant = false;
        self.ref_ = false;
        self.end = false;
        self.parallel = false;
        self.exhibit = false;
        self.asserted = false;
        self.negated = false;
        self.standard_library = false;
        self.public_explicit = false;
        self.event_occurrence = false;
        self.enum_keyword = false;
        self.action_keyword = false;
        self.connect_keyword = false;
        self.portion_kind = PortionKind::None;
        self.ref_behavioral_keyword = None;
        self.direction = Direction::None;
        self.visibility = Visibility::Default;
        self.import_private = false;
        self.multiplicity_lower = None;
        self.multiplicity_upper = None;
        self.default_value = None;
        self.has_default_keyword = false;
        self.prefix_metadata.clear();
        self.metadata.clear();
    }

    /// Drain everything a `buildNode` call consumes, including the
    /// accumulating trivia, leaving the context ready for the next sibling.
    pub fn drain_for_node(&mut self) -> PendingNodeInputs {
        let inputs = PendingNodeInputs {
            abstract_: self.abstract_,
            variation: self.variation,
            readonly: self.readonly,
            derived: self.derived,
            constant: self.constant,
            ref_: self.ref_,
            end: self.end,
            parallel: self.parallel,
            exhibit: self.exhibit,
            asserted: self.asserted,
            negated: self.negated,
            standard_library: self.standard_library,
            public_explicit: self.public_explicit,
            event_occurrence: self.event_occurrence,
            enum_keyword: self.enum_keyword,
            action_keyword: self.action_keyword,
            connect_keyword: self.connect_keyword,
            portion_kind: self.portion_kind,
            ref_behavioral_keyword: self.ref_behavioral_keyword.take(),
            direction: self.direction,
            visibility: self.visibility,
            multiplicity_lower: self.multiplicity_lower.take(),
            multiplicity_upper: self.multiplicity_upper.take(),
            default_value: self.default_value.take(),
            has_default_keyword: self.has_default_keyword,
            prefix_metadata: std::mem::take(&mut self.prefix_metadata),
            metadata: std::mem::take(&mut self.metadata),
            trivia: std::mem::take(&mut self.trivia),
        };
        self.clear_flags();
        inputs
    }
}

/// Everything one `buildNode` call drains out of [`PendingState`] in one shot.
#[derive(Debug, Default)]
pub struct PendingNodeInputs {
    pub abstract_: bool,
    pub variation: bool,
    pub readonly: bool,
    pub derived: bool,
    pub constant: bool,
    pub ref_: bool,
    pub end: bool,
    pub parallel: bool,
    pub exhibit: bool,
    pub asserted: bool,
    pub negated: bool,
    pub standard_library: bool,
    pub public_explicit: bool,
    pub event_occurrence: bool,
    pub enum_keyword: bool,
    pub action_keyword: bool,
    pub connect_keyword: bool,
    pub portion_kind: PortionKind,
    pub ref_behavioral_keyword: Option<crate::base::IStr>,
    pub direction: Direction,
    pub visibility: Visibility,
    pub multiplicity_lower: Option<crate::base::IStr>,
    pub multiplicity_upper: Option<crate::base::IStr>,
    pub default_value: Option<String>,
    pub has_default_keyword: bool,
    pub prefix_metadata: Vec<Reference>,
    pub metadata: Vec<MetadataUsage>,
    pub trivia: Vec<Trivia>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_flags_resets_booleans_but_not_trivia() {
        let mut pending = PendingState::new();
        pending.abstract_ = true;
        pending.trivia.push(Trivia::new(
            crate::model::TriviaKind::LineComment,
            "// hi",
            crate::base::Location::default(),
        ));
        pending.clear_flags();
        assert!(!pending.abstract_);
        assert_eq!(pending.trivia.len(), 1);
    }

    #[test]
    fn drain_for_node_empties_everything_including_trivia() {
        let mut pending = PendingState::new();
        pending.derived = true;
        pending.trivia.push(Trivia::new(
            crate::model::TriviaKind::LineComment,
            "// hi",
            crate::base::Location::default(),
        ));
        let inputs = pending.drain_for_node();
        assert!(inputs.derived);
        assert_eq!(inputs.trivia.len(), 1);
        assert!(pending.trivia.is_empty());
        assert!(!pending.derived);
    }
}
