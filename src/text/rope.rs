//! Rope wrapper using the ropey crate.
//!
//! Positions exposed here are either char (codepoint) indices or UTF-16 code
//! unit offsets. Ropey tracks both metrics in its tree, so conversions are
//! logarithmic and never need a full scan.

use ropey::Rope;
use std::fmt;
use std::ops::Range;

/// Wrapper around `ropey::Rope` with code-unit aware helpers.
#[derive(Clone, Debug, Default)]
pub struct RopeWrapper {
    rope: Rope,
}

impl RopeWrapper {
    /// Create a rope from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Get the number of codepoints.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the number of UTF-16 code units.
    #[must_use]
    pub fn len_units(&self) -> usize {
        self.rope.len_utf16_cu()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Codepoint containing code unit `unit`, clamped to the end.
    #[must_use]
    pub fn unit_to_char(&self, unit: usize) -> usize {
        self.rope.utf16_cu_to_char(unit.min(self.len_units()))
    }

    /// Code unit offset at which codepoint `char_idx` starts, clamped to the end.
    #[must_use]
    pub fn char_to_unit(&self, char_idx: usize) -> usize {
        self.rope.char_to_utf16_cu(char_idx.min(self.len_chars()))
    }

    /// Whether `unit` falls on a codepoint boundary (not inside a surrogate pair).
    #[must_use]
    pub fn is_unit_boundary(&self, unit: usize) -> bool {
        unit <= self.len_units() && self.char_to_unit(self.unit_to_char(unit)) == unit
    }

    /// Text of a code unit range. Both ends must be codepoint boundaries.
    #[must_use]
    pub fn slice_units(&self, range: Range<usize>) -> String {
        let start = self.unit_to_char(range.start);
        let end = self.unit_to_char(range.end).max(start);
        self.rope.slice(start..end).to_string()
    }

    /// Replace the chars in `range` with `text`.
    pub fn splice(&mut self, range: Range<usize>, text: &str) {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        if start < end {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
    }

    /// Replace the entire contents.
    pub fn replace(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Cheap copy of the current contents; ropes share nodes on clone.
    #[must_use]
    pub fn snapshot(&self) -> Rope {
        self.rope.clone()
    }
}

impl fmt::Display for RopeWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
