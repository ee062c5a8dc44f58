//! Path-pattern parsing and matching (spec.md §4.E).

use crate::base::IStr;

/// One of the three pattern kinds derivable from a pattern's textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// `PATH` — matches exactly the node whose id equals the pattern.
    Exact(IStr),
    /// `PATH::*` — matches any node whose id is `PATH::X` for a single
    /// segment `X` (no further `::`). The base itself does not match.
    DirectChild(IStr),
    /// `PATH::**` — matches the base and every descendant.
    RecursiveDescendant(IStr),
}

impl Pattern {
    pub fn parse(text: &str) -> Pattern {
        if let Some(base) = text.strip_suffix("::**") {
            Pattern::RecursiveDescendant(base.into())
        } else if let Some(base) = text.strip_suffix("::*") {
            Pattern::DirectChild(base.into())
        } else {
            Pattern::Exact(text.into())
        }
    }

    pub fn matches(&self, id: &str) -> bool {
        match self {
            Pattern::Exact(path) => id == path.as_ref(),
            Pattern::DirectChild(base) => {
                let base = base.as_ref();
                match id.strip_prefix(base).and_then(|rest| rest.strip_prefix("::")) {
                    Some(remainder) => !remainder.is_empty() && !remainder.contains("::"),
                    None => false,
                }
            }
            Pattern::RecursiveDescendant(base) => {
                let base = base.as_ref();
                id == base || id.strip_prefix(base).and_then(|rest| rest.strip_prefix("::")).is_some()
            }
        }
    }
}

/// Chain several pattern strings into an ordered list.
pub fn parse_multi(patterns: &[String]) -> Vec<Pattern> {
    patterns.iter().map(|p| Pattern::parse(p)).collect()
}

/// The disjunction of an ordered pattern list.
pub fn matches_any(patterns: &[Pattern], id: &str) -> bool {
    patterns.iter().any(|p| p.matches(id))
}

/// The substring up to the last `::`, or absent when `id` is unqualified.
pub fn parent_path(id: &str) -> Option<&str> {
    id.rfind("::").map(|idx| &id[..idx])
}
