//! The canonical source writer (spec.md §4.F).
//!
//! Grounded on the teacher's `syntax/formatter/mod.rs` `render`/`render_node`
//! `at_line_start` / `indent_level` state machine and brace-placement rules.
//! This writer walks the semantic model (component B) directly rather than a
//! rowan CST, so it carries the teacher's token-emission discipline without
//! its `GreenNodeBuilder`/token-stream plumbing.

use crate::core::Id;
use crate::model::{
    Alias, BodyStatement, Direction, Import, MetadataUsage, NamedComment, Node, NodeKind,
    PortionKind, Reference, SemanticModel, StatementKind, TextualRepresentation, TriviaKind,
    Visibility,
};
use crate::write::keywords::write_name;
use crate::write::options::WriteOptions;

/// One entry of the unified body array (spec.md §4.F "Body write"), carrying
/// just enough to sort and then dispatch to the right emission routine.
enum BodyEntry<'a> {
    Documentation(&'a (String, crate::base::Location)),
    AppliedMetadata(&'a MetadataUsage),
    Import(&'a Import),
    Alias(&'a Alias),
    Statement(&'a BodyStatement),
    Child(Id<Node>),
    NamedComment(&'a NamedComment),
    TextualRepresentation(&'a TextualRepresentation),
}

/// Stateful emitter. One `CanonicalWriter` writes exactly one model.
pub struct CanonicalWriter {
    options: WriteOptions,
    output: String,
    indent_level: usize,
    at_line_start: bool,
}

impl CanonicalWriter {
    pub fn new(options: WriteOptions) -> Self {
        Self {
            options,
            output: String::new(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    pub fn write_model(mut self, model: &SemanticModel) -> String {
        self.write_top_level(model);
        self.output
    }

    // --- primitive state transitions ---

    fn write_indent(&mut self) {
        if self.at_line_start {
            self.output.push_str(&self.options.indent(self.indent_level));
            self.at_line_start = false;
        }
    }

    fn write_newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    fn push(&mut self, text: &str) {
        self.write_indent();
        self.output.push_str(text);
    }

    // --- top-level write ---

    fn write_top_level(&mut self, model: &SemanticModel) {
        let mut top_imports: Vec<&Import> = model
            .imports
            .iter()
            .filter(|import| import.owner_scope.is_none())
            .collect();
        top_imports.sort_by_key(|import| source_order_key(import.location.offset, 0));

        let mut top_aliases: Vec<&Alias> = model
            .aliases
            .iter()
            .filter(|alias| alias.owner_scope.is_none())
            .collect();
        top_aliases.sort_by_key(|alias| source_order_key(alias.location.offset, 0));

        for import in &top_imports {
            self.write_import(import);
        }
        for alias in &top_aliases {
            self.write_alias(alias);
        }

        let has_imports_or_aliases = !top_imports.is_empty() || !top_aliases.is_empty();

        let mut top_elements: Vec<(usize, &Node)> = model
            .elements
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent_id.is_none())
            .collect();
        top_elements.sort_by_key(|(idx, node)| source_order_key(node.location.offset, *idx));

        if has_imports_or_aliases && !top_elements.is_empty() {
            self.write_newline();
        }

        for (i, (_, node)) in top_elements.iter().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.write_node(model, node);
        }
    }

    fn write_import(&mut self, import: &Import) {
        self.push("import ");
        if matches!(
            import.visibility,
            crate::model::ImportVisibility::Private
        ) {
            // private imports spell the keyword explicitly ahead of the path
            self.output.push_str("private ");
        }
        self.output.push_str(&write_reference(&import.target));
        match import.kind {
            crate::model::ImportKind::Single => {}
            crate::model::ImportKind::Wildcard => self.output.push_str("::*"),
            crate::model::ImportKind::Recursive => self.output.push_str("::**"),
        }
        self.output.push(';');
        self.write_newline();
    }

    fn write_alias(&mut self, alias: &Alias) {
        self.push("alias ");
        self.output.push_str(&write_name(alias.name.as_ref()));
        self.output.push_str(" for ");
        self.output.push_str(&write_reference(&alias.target));
        self.output.push(';');
        self.write_newline();
    }

    // --- node write (spec.md §4.F "Node write") ---

    fn write_node(&mut self, model: &SemanticModel, node: &Node) {
        // 1. Leading trivia.
        for trivia in &node.leading_trivia {
            self.write_trivia(trivia);
        }

        // 2. Prefix-applied metadata.
        for meta in &node.prefix_applied_metadata {
            self.write_metadata_usage(meta);
        }

        self.write_indent();

        // 3. Visibility keyword.
        match node.visibility {
            Visibility::Private => self.output.push_str("private "),
            Visibility::Protected => self.output.push_str("protected "),
            Visibility::Public => self.output.push_str("public "),
            Visibility::Default => {}
        }

        // 4. Prefix metadata shorthands.
        for (i, reference) in node.prefix_metadata.iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.output.push('#');
            self.output.push_str(&write_reference(reference));
        }
        if !node.prefix_metadata.is_empty() {
            self.output.push(' ');
        }

        // 5. Direction, usages only.
        if node.kind.is_usage() {
            match node.direction {
                Direction::In => self.output.push_str("in "),
                Direction::Out => self.output.push_str("out "),
                Direction::Inout => self.output.push_str("inout "),
                Direction::None => {}
            }
        }

        // 6. assert [not].
        if node.is_asserted {
            self.output.push_str("assert ");
            if node.is_negated {
                self.output.push_str("not ");
            }
        }

        // 7. abstract, variation, parallel (state usages only), readonly, derived, constant.
        if node.is_abstract {
            self.output.push_str("abstract ");
        }
        if node.is_variation {
            self.output.push_str("variation ");
        }
        if node.is_parallel && node.kind == NodeKind::StateUsage {
            self.output.push_str("parallel ");
        }
        if node.is_readonly {
            self.output.push_str("readonly ");
        }
        if node.is_derived {
            self.output.push_str("derived ");
        }
        if node.is_constant {
            self.output.push_str("constant ");
        }

        // 8. ref [behavioral keyword], end, exhibit (state usages only).
        if node.is_ref {
            self.output.push_str("ref ");
            if let Some(keyword) = &node.ref_behavioral_keyword {
                self.output.push_str(keyword.as_ref());
                self.output.push(' ');
            }
        }
        if node.is_end {
            self.output.push_str("end ");
        }
        if node.is_exhibit && node.kind == NodeKind::StateUsage {
            self.output.push_str("exhibit ");
        }

        // 9. Kind keyword, with special cases.
        let mut keyword_written = self.write_kind_keyword(node);

        // 10. EndFeature multiplicity immediately after the keyword.
        if node.kind == NodeKind::EndFeature {
            if let Some(multiplicity) = &node.multiplicity {
                self.output.push('[');
                self.output.push_str(multiplicity.lower.as_ref());
                self.output.push_str("..");
                self.output.push_str(multiplicity.upper.as_ref());
                self.output.push(']');
                keyword_written = true;
            }
        }

        // 11. Name.
        if let Some(name) = &node.name {
            if keyword_written {
                self.output.push(' ');
            }
            self.output.push_str(&write_name(name.as_ref()));
            keyword_written = true;
        }

        // 13. Relation groups: :>, :>>, ::>, then :.
        self.write_relation_group(&mut keyword_written, " :> ", &node.specializes);
        self.write_relation_group(&mut keyword_written, " :>> ", &node.redefines);
        self.write_relation_group(&mut keyword_written, " ::> ", &node.references);
        let is_end = node.kind == NodeKind::EndFeature;
        self.write_relation_group(
            &mut keyword_written,
            if is_end { ":" } else { " : " },
            &node.typed_by,
        );

        // 14. Multiplicity for non-end features.
        if !is_end {
            if let Some(multiplicity) = &node.multiplicity {
                self.output.push(' ');
                self.output.push('[');
                self.output.push_str(multiplicity.lower.as_ref());
                self.output.push_str("..");
                self.output.push_str(multiplicity.upper.as_ref());
                self.output.push(']');
            }
        }

        // 15. Default value, usages only.
        if node.kind.is_usage() {
            if node.has_default_keyword {
                self.output.push_str(" default");
            }
            if let Some(default_value) = &node.default_value {
                self.output.push_str(" = ");
                self.output.push_str(default_value);
            }
        }

        // 16. Connector part.
        if let Some(connector_part) = &node.connector_part {
            self.output.push(' ');
            if node.has_connect_keyword {
                self.output.push_str("connect ");
            }
            self.output.push_str(connector_part);
        }

        // 17. Body, or `;`.
        self.write_body(model, node);
    }

    /// Emits step 9's keyword (plus the special-case substitutions) and
    /// returns whether anything keyword-shaped ended up on the line, so step
    /// 11 knows whether a name needs a leading space.
    fn write_kind_keyword(&mut self, node: &Node) -> bool {
        if node.ref_behavioral_keyword.is_some() {
            // already emitted in step 8, substituting for the kind keyword
            return true;
        }

        let keyword: String = match node.kind {
            NodeKind::EventUsage if node.is_event_occurrence => "event occurrence".to_string(),
            NodeKind::EnumerationUsage if !node.has_enum_keyword => String::new(),
            NodeKind::PortionUsage => match node.portion_kind {
                PortionKind::Snapshot => "snapshot".to_string(),
                PortionKind::Timeslice => "timeslice".to_string(),
                PortionKind::None => "portion".to_string(),
            },
            NodeKind::PerformActionUsage => {
                if node.has_action_keyword {
                    "perform action".to_string()
                } else {
                    "perform".to_string()
                }
            }
            NodeKind::LibraryPackage if node.is_standard_library => {
                format!("standard {}", node.kind.keyword())
            }
            _ => {
                let base = node.kind.keyword();
                if node.kind.has_def_suffix() {
                    format!("{base} def")
                } else {
                    base.to_string()
                }
            }
        };

        if keyword.is_empty() {
            return false;
        }
        self.output.push_str(&keyword);
        true
    }

    fn write_relation_group(
        &mut self,
        keyword_written: &mut bool,
        operator: &str,
        references: &[Reference],
    ) {
        if references.is_empty() {
            return;
        }
        self.output.push_str(operator);
        for (i, reference) in references.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.output.push_str(&write_reference(reference));
        }
        *keyword_written = true;
    }

    // --- body write (spec.md §4.F "Body write") ---

    fn write_body(&mut self, model: &SemanticModel, node: &Node) {
        let scope_imports: Vec<&Import> = model
            .imports
            .iter()
            .filter(|import| import.owner_scope.as_deref() == Some(node.id.as_ref()))
            .collect();
        let scope_aliases: Vec<&Alias> = model
            .aliases
            .iter()
            .filter(|alias| alias.owner_scope.as_deref() == Some(node.id.as_ref()))
            .collect();

        let mut entries: Vec<(u32, usize, BodyEntry)> = Vec::new();
        let mut insertion = 0usize;
        let mut next_index = || {
            insertion += 1;
            insertion - 1
        };

        if let Some(doc) = &node.documentation {
            entries.push((doc.1.offset, next_index(), BodyEntry::Documentation(doc)));
        }
        for meta in &node.applied_metadata {
            entries.push((
                meta.location.offset,
                next_index(),
                BodyEntry::AppliedMetadata(meta),
            ));
        }
        for import in &scope_imports {
            entries.push((
                import.location.offset,
                next_index(),
                BodyEntry::Import(import),
            ));
        }
        for alias in &scope_aliases {
            entries.push((alias.location.offset, next_index(), BodyEntry::Alias(alias)));
        }
        for statement in &node.body_statements {
            entries.push((
                statement.location.offset,
                next_index(),
                BodyEntry::Statement(statement),
            ));
        }
        for &child_id in &node.children {
            let offset = model.elements[child_id].location.offset;
            entries.push((offset, next_index(), BodyEntry::Child(child_id)));
        }
        for comment in &node.named_comments {
            entries.push((
                comment.location.offset,
                next_index(),
                BodyEntry::NamedComment(comment),
            ));
        }
        for repr in &node.textual_representations {
            entries.push((
                repr.location.offset,
                next_index(),
                BodyEntry::TextualRepresentation(repr),
            ));
        }

        let empty = entries.is_empty() && node.result_expression.is_none();
        if empty {
            self.output.push(';');
            self.write_newline();
            return;
        }

        entries.sort_by_key(|(offset, idx, _)| source_order_key(*offset, *idx));

        self.output.push_str(" {");
        self.indent_level += 1;
        self.write_newline();

        for (_, _, entry) in &entries {
            self.write_body_entry(model, entry);
        }

        if let Some(result_expression) = &node.result_expression {
            self.write_indent();
            self.output.push_str(result_expression);
            self.output.push(';');
            self.write_newline();
        }

        if let Some(trailing) = &node.trailing_trivia {
            self.write_trivia(trailing);
        }

        self.indent_level -= 1;
        self.write_indent();
        self.output.push('}');
        self.write_newline();
    }

    fn write_body_entry(&mut self, model: &SemanticModel, entry: &BodyEntry) {
        match entry {
            BodyEntry::Documentation((text, _)) => {
                self.push("doc /* ");
                self.output.push_str(text);
                self.output.push_str(" */");
                self.write_newline();
            }
            BodyEntry::AppliedMetadata(meta) => self.write_metadata_usage(meta),
            BodyEntry::Import(import) => self.write_import(import),
            BodyEntry::Alias(alias) => self.write_alias(alias),
            BodyEntry::Statement(statement) => self.write_statement(statement),
            BodyEntry::Child(child_id) => {
                let child = &model.elements[*child_id];
                self.write_node(model, child);
            }
            BodyEntry::NamedComment(comment) => self.write_named_comment(comment),
            BodyEntry::TextualRepresentation(repr) => self.write_textual_representation(repr),
        }
    }

    fn write_named_comment(&mut self, comment: &NamedComment) {
        self.push("comment");
        if let Some(name) = &comment.name {
            self.output.push(' ');
            self.output.push_str(&write_name(name.as_ref()));
        }
        if !comment.about.is_empty() {
            self.output.push_str(" about ");
            for (i, target) in comment.about.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                self.output.push_str(&write_reference(target));
            }
        }
        self.output.push_str(" /* ");
        self.output.push_str(&comment.text);
        self.output.push_str(" */");
        self.write_newline();
    }

    fn write_textual_representation(&mut self, repr: &TextualRepresentation) {
        self.push("language ");
        if let Some(language) = &repr.language {
            self.output.push('"');
            self.output.push_str(language.as_ref());
            self.output.push('"');
        }
        self.output.push_str(" /* ");
        self.output.push_str(&repr.text);
        self.output.push_str(" */;");
        self.write_newline();
    }

    fn write_trivia(&mut self, trivia: &crate::model::Trivia) {
        match trivia.kind {
            TriviaKind::BlankLine => {
                for _ in 0..trivia.blank_line_count {
                    self.write_newline();
                }
            }
            TriviaKind::LineComment | TriviaKind::BlockComment | TriviaKind::RegularComment => {
                self.push(&trivia.text);
                self.write_newline();
            }
        }
    }

    fn write_metadata_usage(&mut self, meta: &MetadataUsage) {
        self.write_indent();
        self.output.push('@');
        self.output.push_str(&write_reference(&meta.type_ref));
        if meta.features.is_empty() {
            self.output.push(';');
            self.write_newline();
            return;
        }
        self.output.push_str(" {");
        self.indent_level += 1;
        self.write_newline();
        for feature in &meta.features {
            self.write_indent();
            self.output.push_str(":>> ");
            self.output.push_str(&write_name(feature.name.as_ref()));
            if let Some(value) = &feature.value {
                self.output.push_str(" = ");
                self.output.push_str(value);
            }
            self.output.push(';');
            self.write_newline();
        }
        self.indent_level -= 1;
        self.write_indent();
        self.output.push_str("};");
        self.write_newline();
    }

    // --- statement write (spec.md §4.F "Statement write") ---

    fn write_statement(&mut self, statement: &BodyStatement) {
        match statement.kind {
            StatementKind::Succession => {
                let (Some(source), Some(target)) = (&statement.source, &statement.target) else {
                    return;
                };
                let source_text = write_reference(source);
                if source_text.contains(" then ") {
                    self.push(&source_text);
                    self.output.push(';');
                    self.write_newline();
                    return;
                }
                self.push("first ");
                self.output.push_str(&source_text);
                if let Some(guard) = &statement.guard {
                    self.output.push_str(" if ");
                    self.output.push_str(guard);
                }
                self.output.push_str(" then ");
                self.output.push_str(&write_reference(target));
                self.output.push(';');
                self.write_newline();
            }
            StatementKind::Then | StatementKind::First => {
                let body = statement
                    .raw_text
                    .trim_start_matches(|c: char| c.is_ascii_alphabetic())
                    .trim();
                let stripped = body.trim_end_matches(';').trim();
                if stripped.is_empty() {
                    return;
                }
                self.push(&statement.raw_text);
                self.write_newline();
            }
            StatementKind::MetadataUsage => {
                self.push(&statement.raw_text);
                if !statement.raw_text.ends_with('}') && !statement.raw_text.ends_with(';') {
                    self.output.push(';');
                }
                self.write_newline();
            }
            _ => {
                self.push(&statement.raw_text);
                if !statement.raw_text.trim_end().ends_with(';')
                    && !statement.raw_text.trim_end().ends_with('}')
                {
                    self.output.push(';');
                }
                self.write_newline();
            }
        }
    }
}

fn write_reference(reference: &Reference) -> String {
    if reference.conjugated {
        format!("~{}", reference.path.as_ref())
    } else {
        reference.path.as_ref().to_string()
    }
}

/// Sort key implementing "(offset > 0 first, ascending offset; ties →
/// insertion index)" (spec.md §4.F "Body write" / "Top-level write").
fn source_order_key(offset: u32, insertion_index: usize) -> (u8, u32, usize) {
    if offset > 0 {
        (0, offset, insertion_index)
    } else {
        (1, 0, insertion_index)
    }
}
