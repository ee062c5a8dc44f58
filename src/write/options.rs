//! Writer options.
//!
//! Grounded on the teacher's `syntax/formatter/options.rs` `FormatOptions`:
//! a small struct with a `Default` impl and an `indent` helper, narrowed to
//! what the canonical writer actually varies (spec.md §4.F fixes four-space
//! indentation, so there is no `insert_spaces`/`print_width` knob to carry
//! over).
#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub indent_width: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

impl WriteOptions {
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_width * level)
    }
}
