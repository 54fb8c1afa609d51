//! Index resolution.
//!
//! Callers address text with signed positions in one of three spaces.
//! Negative positions count back from the end, so `-1` is the last element.
//! The functions here turn such positions into plain offsets for a given
//! length; they never look at the text itself.

use crate::error::{Error, Result};
use std::ops::{Bound, Range, RangeBounds};

/// The space a position is measured in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Space {
    /// UTF-16 code units, the storage unit.
    CodeUnit,
    /// Unicode scalar values.
    #[default]
    Codepoint,
    /// Extended grapheme clusters.
    Character,
}

/// How a resolved index is going to be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Reading one element: `0 <= i < len`.
    Read,
    /// Inserting before an element: `0 <= i <= len`.
    Insert,
}

#[allow(clippy::cast_possible_wrap)]
fn from_end(index: isize, len: usize) -> isize {
    if index < 0 { len as isize + index } else { index }
}

/// Resolve a signed index against `len`.
pub fn resolve_index(index: isize, len: usize, access: Access) -> Result<usize> {
    let resolved = from_end(index, len);
    let limit = match access {
        Access::Read => len,
        Access::Insert => len + 1,
    };
    if resolved < 0 || resolved as usize >= limit {
        return Err(Error::out_of_range(index, len));
    }
    Ok(resolved as usize)
}

/// Resolve a signed range against `len`.
///
/// The start must land inside `0..=len`. The end is clamped to `len`, and a
/// range whose end falls before its start collapses to the empty range at
/// the start.
pub fn resolve_range<R: RangeBounds<isize>>(range: R, len: usize) -> Result<Range<usize>> {
    let start_raw = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let start = resolve_index(start_raw, len, Access::Insert)?;

    let end = match range.end_bound() {
        Bound::Included(&e) => from_end(e, len).saturating_add(1),
        Bound::Excluded(&e) => from_end(e, len),
        Bound::Unbounded => len as isize,
    };
    let end = end.clamp(start as isize, len as isize) as usize;
    Ok(start..end)
}

/// Resolve a start-plus-count pair against `len`.
///
/// A negative count is an error; a count running past the end is clamped.
pub fn resolve_span(start: isize, count: isize, len: usize) -> Result<Range<usize>> {
    let begin = resolve_index(start, len, Access::Insert)?;
    if count < 0 {
        return Err(Error::out_of_range(count, len));
    }
    let end = begin.saturating_add(count as usize).min(len);
    Ok(begin..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_index_read() {
        assert_eq!(resolve_index(0, 6, Access::Read), Ok(0));
        assert_eq!(resolve_index(-1, 6, Access::Read), Ok(5));
        assert_eq!(resolve_index(-6, 6, Access::Read), Ok(0));
        assert!(resolve_index(6, 6, Access::Read).is_err());
        assert!(resolve_index(-7, 6, Access::Read).is_err());
    }

    #[test]
    fn test_resolve_index_insert() {
        assert_eq!(resolve_index(6, 6, Access::Insert), Ok(6));
        assert_eq!(resolve_index(0, 0, Access::Insert), Ok(0));
        assert!(resolve_index(7, 6, Access::Insert).is_err());
        assert!(resolve_index(0, 0, Access::Read).is_err());
    }

    #[test]
    fn test_resolve_range_forms() {
        // "hello there" has 11 codepoints
        assert_eq!(resolve_range(1..4, 11), Ok(1..4));
        assert_eq!(resolve_range(1..=3, 11), Ok(1..4));
        assert_eq!(resolve_range(-4..=-2, 11), Ok(7..10));
        assert_eq!(resolve_range(2.., 11), Ok(2..11));
        assert_eq!(resolve_range(.., 11), Ok(0..11));
        assert_eq!(resolve_range(..=-1, 11), Ok(0..11));
    }

    #[test]
    fn test_resolve_range_clamps_and_collapses() {
        assert_eq!(resolve_range(0..100, 6), Ok(0..6));
        assert_eq!(resolve_range(-2..=-4, 11), Ok(9..9));
        assert_eq!(resolve_range(6..=2, 6), Ok(6..6));
        assert_eq!(resolve_range(11.., 11), Ok(11..11));
    }

    #[test]
    fn test_resolve_range_start_out_of_range() {
        assert!(resolve_range(12.., 11).is_err());
        assert!(resolve_range(-10..=-7, 6).is_err());
        // Repeated resolution gives the same answer.
        assert_eq!(resolve_range(7..11, 6), resolve_range(7..11, 6));
    }

    #[test]
    fn test_resolve_span() {
        assert_eq!(resolve_span(1, 3, 11), Ok(1..4));
        assert_eq!(resolve_span(-3, 2, 11), Ok(8..10));
        assert_eq!(resolve_span(6, 2, 6), Ok(6..6));
        assert_eq!(resolve_span(0, 100, 6), Ok(0..6));
        assert!(resolve_span(-7, 10, 6).is_err());
        assert!(resolve_span(7, 3, 6).is_err());
        assert!(resolve_span(0, -1, 6).is_err());
    }
}
