//! String interner for efficient string storage and comparison.
//!
//! Uses `Rc<str>` for cheap cloning (reference count increment instead of allocation).
//! The interner deduplicates strings so identical content shares the same allocation,
//! and therefore the same pointer identity — callers may compare interned strings with
//! pointer equality in performance-critical paths, but must never compare a raw
//! (non-interned) string to an interned one that way.
//!
//! The pipeline that owns an `Interner` is single-threaded (see the crate's concurrency
//! model), so `Rc` rather than `Arc` is the correct choice here.

use std::collections::HashSet;
use std::rc::Rc;

/// An interned string - cheap to clone (just an `Rc` increment).
pub type IStr = Rc<str>;

/// String interner that deduplicates strings.
///
/// Interning a string returns an `Rc<str>` that can be cheaply cloned. If the same
/// content is interned multiple times, the same `Rc` allocation is returned.
#[derive(Debug, Default, Clone)]
pub struct Interner {
    strings: HashSet<Rc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning a cheap-to-clone canonical reference.
    pub fn intern(&mut self, s: &str) -> IStr {
        if let Some(existing) = self.strings.get(s) {
            Rc::clone(existing)
        } else {
            let rc: Rc<str> = Rc::from(s);
            self.strings.insert(Rc::clone(&rc));
            rc
        }
    }

    /// Intern an owned string, avoiding a copy when it is not already present.
    pub fn intern_string(&mut self, s: String) -> IStr {
        if let Some(existing) = self.strings.get(s.as_str()) {
            Rc::clone(existing)
        } else {
            let rc: Rc<str> = Rc::from(s);
            self.strings.insert(Rc::clone(&rc));
            rc
        }
    }

    /// Intern the concatenation `scope + "::" + name` without an intermediate
    /// allocation when the result is already interned.
    pub fn intern_joined(&mut self, scope: &str, name: &str) -> IStr {
        if scope.is_empty() {
            return self.intern(name);
        }
        let mut joined = String::with_capacity(scope.len() + 2 + name.len());
        joined.push_str(scope);
        joined.push_str("::");
        joined.push_str(name);
        self.intern_string(joined)
    }

    /// Look up an already-interned string without creating a new one.
    pub fn get(&self, s: &str) -> Option<IStr> {
        self.strings.get(s).cloned()
    }

    /// Number of unique strings interned.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Release every interned string. Equivalent to the arena's "reset to empty."
    pub fn clear(&mut self) {
        self.strings.clear();
    }
}
