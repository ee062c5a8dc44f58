//! Reserved-word detection and name quoting (spec.md §4.F "Name printing").
//!
//! Grounded on the teacher's `syntax/formatter/lexer.rs` keyword-table idiom:
//! a flat, baked-in word list checked by exact match rather than re-deriving
//! it from the parser's token kinds, since this writer has no lexer of its
//! own to ask.

use std::collections::HashSet;
use std::sync::LazyLock;

static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "package", "library", "standard", "import", "alias", "private", "protected", "public",
        "part", "def", "action", "state", "port", "attribute", "constraint", "requirement",
        "connection", "interface", "item", "occurrence", "calc", "case", "use", "verification",
        "view", "viewpoint", "rendering", "concern", "allocation", "enum", "metadata", "end",
        "event", "portion", "snapshot", "timeslice", "perform", "transition", "flow", "in",
        "out", "inout", "assert", "not", "abstract", "variation", "parallel", "readonly",
        "derived", "constant", "ref", "exhibit", "default", "connect", "first", "then", "if",
        "else", "while", "for", "loop", "terminate", "merge", "decide", "join", "fork", "return",
        "accept", "send", "do", "entry", "exit", "bind", "allocate", "succession", "satisfy",
        "verify", "include", "expose", "render", "frame", "actor", "stakeholder", "objective",
        "subject", "require", "assume", "comment", "doc", "language", "about", "specialization",
        "conjugate", "all", "nonunique", "ordered", "redefines", "subsets", "references",
        "feature", "classifier", "type", "namespace", "class", "association", "behavior",
        "function", "predicate", "interaction", "metaclass", "individual", "binding", "filter",
        "expr", "true", "false", "null",
    ]
    .into_iter()
    .collect()
});

/// Whether `name` requires single-quote wrapping per spec.md §4.F.
pub fn needs_quoting(name: &str) -> bool {
    if name.is_empty() {
        return true;
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap();
    if !(first.is_ascii_alphabetic() || first == '_') {
        return true;
    }
    if name
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
    {
        return true;
    }
    RESERVED_WORDS.contains(name)
}

/// Render `name` the way it should appear in source: quoted with `'`
/// wrapping and `'`/`\` escaped when [`needs_quoting`] holds, verbatim
/// otherwise.
pub fn write_name(name: &str) -> String {
    if !needs_quoting(name) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 2);
    out.push('\'');
    for c in name.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
