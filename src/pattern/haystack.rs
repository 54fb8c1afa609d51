//! Immutable snapshot that matchers run against.

use crate::text::BoundaryCache;
use ropey::Rope;
use std::cell::OnceCell;
use std::ops::Range;

/// A frozen copy of a buffer's text.
///
/// Matchers see UTF-8 text and report UTF-8 offsets; everything outside the
/// matcher works in code units. The haystack translates between the two
/// through the rope, and builds codepoint tables only when a caller asks for
/// a non-code-unit position.
#[derive(Debug)]
pub struct Haystack {
    rope: Rope,
    text: String,
    bounds: OnceCell<BoundaryCache>,
}

impl Haystack {
    /// Snapshot a string.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            text: text.to_string(),
            bounds: OnceCell::new(),
        }
    }

    /// Snapshot a rope.
    #[must_use]
    pub fn from_rope(rope: Rope) -> Self {
        let text = rope.to_string();
        Self {
            rope,
            text,
            bounds: OnceCell::new(),
        }
    }

    /// The text as UTF-8.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in code units.
    #[must_use]
    pub fn len_units(&self) -> usize {
        self.rope.len_utf16_cu()
    }

    /// Whether the haystack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset of code unit `unit`.
    #[must_use]
    pub fn unit_to_byte(&self, unit: usize) -> usize {
        let ch = self.rope.utf16_cu_to_char(unit.min(self.len_units()));
        self.rope.char_to_byte(ch)
    }

    /// Code unit offset of byte `byte`.
    #[must_use]
    pub fn byte_to_unit(&self, byte: usize) -> usize {
        let ch = self.rope.byte_to_char(byte.min(self.text.len()));
        self.rope.char_to_utf16_cu(ch)
    }

    /// Text of a code unit range.
    #[must_use]
    pub fn slice_units(&self, range: Range<usize>) -> &str {
        let start = self.unit_to_byte(range.start);
        let end = self.unit_to_byte(range.end).max(start);
        &self.text[start..end]
    }

    /// Code unit offset one codepoint past `unit`, or `None` at the end.
    #[must_use]
    pub fn next_boundary(&self, unit: usize) -> Option<usize> {
        let ch = self.rope.utf16_cu_to_char(unit.min(self.len_units()));
        (ch < self.rope.len_chars()).then(|| self.rope.char_to_utf16_cu(ch + 1))
    }

    /// Boundary tables for this snapshot, built on first use.
    pub fn bounds(&self) -> &BoundaryCache {
        self.bounds.get_or_init(|| BoundaryCache::build(&self.text, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_byte_mapping() {
        // 'ж' is 2 bytes and 1 unit; the astral digit is 4 bytes and 2 units.
        let hay = Haystack::new("ж\u{1D7D9}!");
        assert_eq!(hay.len_units(), 4);
        assert_eq!(hay.unit_to_byte(1), 2);
        assert_eq!(hay.unit_to_byte(3), 6);
        assert_eq!(hay.byte_to_unit(6), 3);
        assert_eq!(hay.slice_units(1..3), "\u{1D7D9}");
    }

    #[test]
    fn test_next_boundary_steps_whole_codepoints() {
        let hay = Haystack::new("\u{1D7D9}a");
        assert_eq!(hay.next_boundary(0), Some(2));
        assert_eq!(hay.next_boundary(2), Some(3));
        assert_eq!(hay.next_boundary(3), None);
    }
}
