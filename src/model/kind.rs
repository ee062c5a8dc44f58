//! The closed set of node kinds and the classifier predicates over them.
//!
//! Modeled as a tagged sum type per the design note in spec.md §9: the
//! classifier predicates (`is_package`, `is_definition`, `is_usage`,
//! `is_relationship`) are plain match-based functions, not an inheritance
//! hierarchy, mirroring `SymbolKind::from_definition_kind` / `display` in the
//! teacher's `hir/symbols/types.rs`.

/// The kind of a [`crate::model::Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Package,
    LibraryPackage,

    PartDef,
    PartUsage,
    ActionDef,
    ActionUsage,
    StateDef,
    StateUsage,
    PortDef,
    PortUsage,
    AttributeDef,
    AttributeUsage,
    ConstraintDef,
    ConstraintUsage,
    RequirementDef,
    RequirementUsage,
    ConnectionDef,
    ConnectionUsage,
    InterfaceDef,
    InterfaceUsage,
    ItemDef,
    ItemUsage,
    OccurrenceDef,
    OccurrenceUsage,
    CalcDef,
    CalcUsage,
    UseCaseDef,
    UseCaseUsage,
    VerificationDef,
    VerificationUsage,
    ViewDef,
    ViewUsage,
    ViewpointDef,
    ViewpointUsage,
    RenderingDef,
    RenderingUsage,
    ConcernDef,
    ConcernUsage,
    AllocationDef,
    AllocationUsage,
    EnumerationDef,
    EnumerationUsage,
    MetadataDef,

    /// A connector endpoint feature (`end ...`).
    EndFeature,
    EventUsage,
    PortionUsage,
    PerformActionUsage,
    TransitionUsage,
    FlowUsage,
}

impl NodeKind {
    /// True for package-like scopes (`Package`, `LibraryPackage`).
    pub fn is_package(self) -> bool {
        matches!(self, NodeKind::Package | NodeKind::LibraryPackage)
    }

    /// True for `*Def` kinds: elements that introduce a new type-level element.
    pub fn is_definition(self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            PartDef
                | ActionDef
                | StateDef
                | PortDef
                | AttributeDef
                | ConstraintDef
                | RequirementDef
                | ConnectionDef
                | InterfaceDef
                | ItemDef
                | OccurrenceDef
                | CalcDef
                | UseCaseDef
                | VerificationDef
                | ViewDef
                | ViewpointDef
                | RenderingDef
                | ConcernDef
                | AllocationDef
                | EnumerationDef
                | MetadataDef
        )
    }

    /// True for `*Usage` kinds and the usage-shaped special forms
    /// (`EndFeature`, `EventUsage`, `PortionUsage`, `PerformActionUsage`,
    /// `TransitionUsage`, `FlowUsage`): occurrences bound to a definition.
    pub fn is_usage(self) -> bool {
        !self.is_package() && !self.is_definition()
    }

    /// The closed `NodeKind` set never includes a relationship-shaped variant
    /// of its own — independent relationship edges are modeled by
    /// [`crate::model::Relationship`], not by `Node`. This predicate is kept
    /// for classifier symmetry with the other three and is always `false`;
    /// see DESIGN.md for why this was the resolved reading of spec.md §3.
    pub fn is_relationship(self) -> bool {
        false
    }

    /// The canonical source keyword for this kind, before any special-case
    /// substitution described in the writer's node-write sequence (spec.md
    /// §4.F step 9).
    pub fn keyword(self) -> &'static str {
        use NodeKind::*;
        match self {
            Package | LibraryPackage => "package",
            PartDef | PartUsage => "part",
            ActionDef | ActionUsage => "action",
            StateDef | StateUsage => "state",
            PortDef | PortUsage => "port",
            AttributeDef | AttributeUsage => "attribute",
            ConstraintDef | ConstraintUsage => "constraint",
            RequirementDef | RequirementUsage => "requirement",
            ConnectionDef | ConnectionUsage => "connection",
            InterfaceDef | InterfaceUsage => "interface",
            ItemDef | ItemUsage => "item",
            OccurrenceDef | OccurrenceUsage => "occurrence",
            CalcDef | CalcUsage => "calc",
            UseCaseDef | UseCaseUsage => "use case",
            VerificationDef | VerificationUsage => "verification",
            ViewDef | ViewUsage => "view",
            ViewpointDef | ViewpointUsage => "viewpoint",
            RenderingDef | RenderingUsage => "rendering",
            ConcernDef | ConcernUsage => "concern",
            AllocationDef | AllocationUsage => "allocation",
            EnumerationDef | EnumerationUsage => "enum",
            MetadataDef => "metadata",
            EndFeature => "end",
            EventUsage => "event",
            PortionUsage => "portion",
            PerformActionUsage => "perform",
            TransitionUsage => "transition",
            FlowUsage => "flow",
        }
    }

    /// Whether this kind's keyword is followed by `def` to distinguish it
    /// from the usage form (`part def` vs. `part`).
    pub fn has_def_suffix(self) -> bool {
        self.is_definition()
    }
}
