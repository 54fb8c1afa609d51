//! Guarded code-unit text buffer.
//!
//! [`TextBuffer`] owns the text behind a [`UString`](crate::UString). All
//! positions at this level are UTF-16 code unit offsets. Mutators take
//! `&self`: a scan callback may hold a shared reference to the buffer it is
//! scanning, and the buffer's [`MutationGuard`] decides whether a write is
//! allowed.

use crate::error::{Error, Result};
use crate::text::boundary::{BoundaryCache, Rounding};
use crate::text::guard::{MutationGuard, ScanToken};
use crate::text::index::Space;
use crate::text::rope::RopeWrapper;
use ropey::Rope;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Range;

/// Rope-backed text with a version counter and a scan guard.
///
/// The version increments on every successful structural write and never
/// on reads. Boundary tables are rebuilt lazily on the first conversion
/// after a write.
pub struct TextBuffer {
    rope: RefCell<RopeWrapper>,
    version: Cell<u64>,
    bounds: RefCell<BoundaryCache>,
    guard: MutationGuard,
}

impl TextBuffer {
    /// Create an empty text buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a buffer with initial text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: RefCell::new(RopeWrapper::from_str(text)),
            version: Cell::new(0),
            bounds: RefCell::new(BoundaryCache::new()),
            guard: MutationGuard::new(),
        }
    }

    /// Length in code units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rope.borrow().len_units()
    }

    /// Length in codepoints.
    #[must_use]
    pub fn len_codepoints(&self) -> usize {
        self.rope.borrow().len_chars()
    }

    /// Length in grapheme clusters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.with_bounds(BoundaryCache::len_clusters)
    }

    /// Length in `space`.
    #[must_use]
    pub fn len_in(&self, space: Space) -> usize {
        match space {
            Space::CodeUnit => self.len(),
            Space::Codepoint => self.len_codepoints(),
            Space::Character => self.len_chars(),
        }
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.borrow().is_empty()
    }

    /// Current version.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    /// The whole text.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.borrow().to_string()
    }

    /// Cheap copy of the current contents for a scan.
    #[must_use]
    pub fn snapshot(&self) -> Rope {
        self.rope.borrow().snapshot()
    }

    /// Text of a code unit range.
    pub fn read(&self, range: Range<usize>) -> Result<String> {
        let rope = self.rope.borrow();
        check_range(&rope, &range)?;
        Ok(rope.slice_units(range))
    }

    /// Replace a code unit range. An empty range inserts.
    pub fn write(&self, range: Range<usize>, replacement: &str) -> Result<()> {
        self.guard.assert_mutable()?;
        self.apply(range, replacement)
    }

    /// Append text to the end.
    pub fn append(&self, text: &str) -> Result<()> {
        let end = self.len();
        self.write(end..end, text)
    }

    /// Remove everything.
    pub fn clear(&self) -> Result<()> {
        self.set_text("")
    }

    /// Replace the whole text.
    pub fn set_text(&self, text: &str) -> Result<()> {
        self.guard.assert_mutable()?;
        self.rope.borrow_mut().replace(text);
        self.bump();
        Ok(())
    }

    /// The buffer's scan guard.
    #[must_use]
    pub fn guard(&self) -> &MutationGuard {
        &self.guard
    }

    /// Start a scan at the current version.
    pub fn begin_scan(&self) -> ScanToken<'_> {
        self.guard.enter(self.version())
    }

    /// Apply the result of a scan as one write.
    ///
    /// Only the outermost scan may commit, and only if nothing else wrote to
    /// the buffer since it began.
    pub fn commit(&self, token: &ScanToken<'_>, range: Range<usize>, text: &str) -> Result<()> {
        if !self.guard.can_commit(token) || token.version() != self.version() {
            tracing::warn!(
                depth = self.guard.depth(),
                scan_version = token.version(),
                version = self.version(),
                "rejected commit"
            );
            return Err(Error::ConcurrentMutation);
        }
        self.apply(range, text)?;
        tracing::debug!(version = self.version(), "committed scan result");
        Ok(())
    }

    /// Run `f` against boundary tables for the current version.
    pub fn with_bounds<R>(&self, f: impl FnOnce(&BoundaryCache) -> R) -> R {
        let version = self.version();
        let mut bounds = self.bounds.borrow_mut();
        bounds.ensure_fresh(version, || self.text());
        f(&bounds)
    }

    /// Convert a position between spaces.
    pub fn convert(&self, pos: usize, from: Space, to: Space, rounding: Rounding) -> Result<usize> {
        if from == to {
            let len = self.len_in(from);
            if pos > len {
                return Err(Error::IndexOutOfRange {
                    index: pos as isize,
                    len,
                });
            }
            return Ok(pos);
        }
        self.with_bounds(|b| b.convert(pos, from, to, rounding))
    }

    /// Convert a range between spaces, rounding outward.
    pub fn convert_range(
        &self,
        range: Range<usize>,
        from: Space,
        to: Space,
    ) -> Result<Range<usize>> {
        self.with_bounds(|b| b.convert_range(range, from, to))
    }

    fn apply(&self, range: Range<usize>, replacement: &str) -> Result<()> {
        {
            let mut rope = self.rope.borrow_mut();
            check_range(&rope, &range)?;
            let start = rope.unit_to_char(range.start);
            let end = rope.unit_to_char(range.end);
            rope.splice(start..end, replacement);
        }
        self.bump();
        Ok(())
    }

    fn bump(&self) {
        self.version.set(self.version.get().wrapping_add(1));
    }
}

fn check_range(rope: &RopeWrapper, range: &Range<usize>) -> Result<()> {
    let len = rope.len_units();
    if range.start > range.end || range.end > len {
        return Err(Error::IndexOutOfRange {
            index: range.end.max(range.start) as isize,
            len,
        });
    }
    for offset in [range.start, range.end] {
        if !rope.is_unit_boundary(offset) {
            return Err(Error::CodepointBoundaryViolation { offset });
        }
    }
    Ok(())
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TextBuffer {
    /// Deep copy of the text. The copy has no active scans.
    fn clone(&self) -> Self {
        Self {
            rope: RefCell::new(self.rope.borrow().clone()),
            version: Cell::new(0),
            bounds: RefCell::new(BoundaryCache::new()),
            guard: MutationGuard::new(),
        }
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("text", &self.text())
            .field("version", &self.version())
            .field("scan_depth", &self.guard.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let buf = TextBuffer::with_text("hello");
        assert_eq!(buf.read(1..3).unwrap(), "el");
        buf.write(0..1, "J").unwrap();
        assert_eq!(buf.text(), "Jello");
        buf.write(5..5, "!").unwrap();
        assert_eq!(buf.text(), "Jello!");
        assert_eq!(buf.version(), 2);
    }

    #[test]
    fn test_reads_do_not_bump_version() {
        let buf = TextBuffer::with_text("abc");
        let _ = buf.read(0..3);
        let _ = buf.len_chars();
        assert_eq!(buf.version(), 0);
    }

    #[test]
    fn test_surrogate_split_rejected() {
        let buf = TextBuffer::with_text("a\u{1D7D9}b");
        assert_eq!(buf.len(), 4);
        assert_eq!(
            buf.write(2..2, "x"),
            Err(Error::CodepointBoundaryViolation { offset: 2 })
        );
        assert_eq!(
            buf.read(0..2),
            Err(Error::CodepointBoundaryViolation { offset: 2 })
        );
        assert_eq!(buf.text(), "a\u{1D7D9}b");
        assert_eq!(buf.version(), 0);
    }

    #[test]
    fn test_out_of_range() {
        let buf = TextBuffer::with_text("abc");
        assert!(matches!(
            buf.read(2..5),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(buf.write(4..4, "x").is_err());
    }

    #[test]
    fn test_write_during_scan_rejected() {
        let buf = TextBuffer::with_text("abc");
        let token = buf.begin_scan();
        assert_eq!(buf.append("d"), Err(Error::ConcurrentMutation));
        assert_eq!(buf.clear(), Err(Error::ConcurrentMutation));
        buf.commit(&token, 0..1, "A").unwrap();
        drop(token);
        assert_eq!(buf.text(), "Abc");
        assert_eq!(buf.version(), 1);
    }

    #[test]
    fn test_nested_commit_rejected() {
        let buf = TextBuffer::with_text("abc");
        let _outer = buf.begin_scan();
        let inner = buf.begin_scan();
        assert_eq!(buf.commit(&inner, 0..1, "x"), Err(Error::ConcurrentMutation));
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_stale_commit_rejected() {
        let buf = TextBuffer::with_text("abc");
        let token = buf.begin_scan();
        drop(token);
        buf.append("d").unwrap();
        let stale = buf.guard().enter(0);
        assert_eq!(buf.commit(&stale, 0..1, "x"), Err(Error::ConcurrentMutation));
    }

    #[test]
    fn test_bounds_follow_writes() {
        let buf = TextBuffer::with_text("ab");
        assert_eq!(buf.convert(2, Space::Codepoint, Space::CodeUnit, Rounding::Down), Ok(2));
        buf.write(0..0, "\u{1D7D9}").unwrap();
        assert_eq!(buf.convert(2, Space::Codepoint, Space::CodeUnit, Rounding::Down), Ok(3));
        assert_eq!(buf.len_codepoints(), 3);
    }

    #[test]
    fn test_clone_is_deep() {
        let a = TextBuffer::with_text("abc");
        let _scan = a.begin_scan();
        let b = a.clone();
        b.append("d").unwrap();
        assert_eq!(a.text(), "abc");
        assert_eq!(b.text(), "abcd");
    }
}
