//! Match results.

use super::{Haystack, RawMatch};
use crate::error::Result;
use crate::text::Space;
use std::ops::Range;
use std::rc::Rc;

/// One match over a snapshot of the scanned text.
///
/// Capture ranges are held in code units and converted on request, so a
/// match that is only used for its text never builds boundary tables.
#[derive(Clone, Debug)]
pub struct Match {
    hay: Rc<Haystack>,
    groups: Vec<Option<Range<usize>>>,
}

impl Match {
    pub(crate) fn new(hay: Rc<Haystack>, raw: RawMatch) -> Self {
        Self {
            hay,
            groups: raw.groups,
        }
    }

    /// Number of groups, including the whole match as group 0.
    #[must_use]
    pub fn group_len(&self) -> usize {
        self.groups.len()
    }

    /// Text of the whole match.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.get(0).unwrap_or_default()
    }

    /// Whether the match is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unit_range().is_empty()
    }

    /// Text of group `index`, or `None` if the group does not exist or did
    /// not participate.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        let range = self.groups.get(index)?.clone()?;
        Some(self.hay.slice_units(range))
    }

    /// Group lookup with negative indices counting back from the last
    /// group. Negative indices never reach the whole match.
    #[must_use]
    pub fn get_signed(&self, index: isize) -> Option<&str> {
        self.get(self.signed_group(index)?)
    }

    /// Resolve a signed group index.
    #[must_use]
    pub fn signed_group(&self, index: isize) -> Option<usize> {
        if index >= 0 {
            return Some(index as usize);
        }
        let resolved = self.groups.len() as isize + index;
        (resolved >= 1).then_some(resolved as usize)
    }

    /// Whole-match range in code units.
    #[must_use]
    pub fn unit_range(&self) -> Range<usize> {
        self.group_units(0).unwrap_or(0..0)
    }

    /// Range of group `index` in code units.
    #[must_use]
    pub fn group_units(&self, index: usize) -> Option<Range<usize>> {
        self.groups.get(index)?.clone()
    }

    /// Whole-match range in codepoints.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range_in(Space::Codepoint, 0).unwrap_or(0..0)
    }

    /// Range of group `index` in `space`.
    #[must_use]
    pub fn range_in(&self, space: Space, index: usize) -> Option<Range<usize>> {
        let units = self.group_units(index)?;
        if space == Space::CodeUnit {
            return Some(units);
        }
        self.convert(units, space).ok()
    }

    fn convert(&self, units: Range<usize>, space: Space) -> Result<Range<usize>> {
        self.hay
            .bounds()
            .convert_range(units, Space::CodeUnit, space)
    }

    /// Text before the match.
    #[must_use]
    pub fn pre_match(&self) -> &str {
        self.hay.slice_units(0..self.unit_range().start)
    }

    /// Text after the match.
    #[must_use]
    pub fn post_match(&self) -> &str {
        self.hay
            .slice_units(self.unit_range().end..self.hay.len_units())
    }

    /// The text the match was found in.
    #[must_use]
    pub fn haystack(&self) -> &str {
        self.hay.as_str()
    }

    /// Texts of all groups, whole match first.
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        (0..self.groups.len()).map(|i| self.get(i))
    }
}
