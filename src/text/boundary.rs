//! Codepoint and grapheme cluster boundary tables.
//!
//! A [`BoundaryCache`] records where every codepoint starts in code units and
//! where every grapheme cluster starts in codepoints, for one version of a
//! buffer. Lookups binary-search these tables.

use crate::error::{Error, Result};
use crate::text::index::Space;
use crate::unicode::cluster_starts;

/// Which way to round a position that falls inside a larger unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Toward the start of the containing unit.
    Down,
    /// Toward the end of the containing unit.
    Up,
}

/// Boundary tables for one version of a text.
#[derive(Clone, Debug)]
pub struct BoundaryCache {
    version: Option<u64>,
    /// Code unit offset of each codepoint, plus the total unit length.
    unit_starts: Vec<usize>,
    /// Codepoint index of each cluster, plus the total codepoint count.
    cluster_starts: Vec<usize>,
}

impl Default for BoundaryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundaryCache {
    /// An empty cache that has not been built for any version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: None,
            unit_starts: vec![0],
            cluster_starts: vec![0],
        }
    }

    /// Build tables for `text` at `version`.
    #[must_use]
    pub fn build(text: &str, version: u64) -> Self {
        let mut cache = Self::new();
        cache.rebuild(text, version);
        cache
    }

    /// Version the tables were built for.
    #[must_use]
    pub fn version(&self) -> Option<u64> {
        self.version
    }

    /// Whether the tables describe `version`.
    #[must_use]
    pub fn is_fresh(&self, version: u64) -> bool {
        self.version == Some(version)
    }

    /// Rebuild from `text` unless already built for `version`.
    ///
    /// `text` is only called when a rebuild is needed.
    pub fn ensure_fresh(&mut self, version: u64, text: impl FnOnce() -> String) {
        if !self.is_fresh(version) {
            self.rebuild(&text(), version);
        }
    }

    fn rebuild(&mut self, text: &str, version: u64) {
        self.unit_starts.clear();
        let mut unit = 0;
        for c in text.chars() {
            self.unit_starts.push(unit);
            unit += c.len_utf16();
        }
        self.unit_starts.push(unit);
        self.cluster_starts = cluster_starts(text);
        self.version = Some(version);
        tracing::trace!(
            version,
            codepoints = self.len_codepoints(),
            "rebuilt boundary tables"
        );
    }

    /// Length in code units.
    #[must_use]
    pub fn len_units(&self) -> usize {
        self.unit_starts.last().copied().unwrap_or(0)
    }

    /// Length in codepoints.
    #[must_use]
    pub fn len_codepoints(&self) -> usize {
        self.unit_starts.len() - 1
    }

    /// Length in grapheme clusters.
    #[must_use]
    pub fn len_clusters(&self) -> usize {
        self.cluster_starts.len() - 1
    }

    /// Length in `space`.
    #[must_use]
    pub fn len_in(&self, space: Space) -> usize {
        match space {
            Space::CodeUnit => self.len_units(),
            Space::Codepoint => self.len_codepoints(),
            Space::Character => self.len_clusters(),
        }
    }

    /// Code unit offset of codepoint `index`.
    pub fn codepoint_to_unit(&self, index: usize) -> Result<usize> {
        self.unit_starts
            .get(index)
            .copied()
            .ok_or_else(|| out_of_range(index, self.len_codepoints()))
    }

    /// Codepoint index at code unit `unit`, which must be a boundary.
    pub fn unit_to_codepoint(&self, unit: usize) -> Result<usize> {
        match self.unit_starts.binary_search(&unit) {
            Ok(i) => Ok(i),
            Err(i) if i < self.unit_starts.len() => {
                Err(Error::CodepointBoundaryViolation { offset: unit })
            }
            Err(_) => Err(out_of_range(unit, self.len_units())),
        }
    }

    /// Codepoint index at code unit `unit`, rounding a position inside a
    /// surrogate pair in the given direction.
    pub fn unit_to_codepoint_rounded(&self, unit: usize, rounding: Rounding) -> Result<usize> {
        round(&self.unit_starts, unit, rounding)
    }

    /// Codepoint index at which cluster `index` starts.
    pub fn cluster_to_codepoint(&self, index: usize) -> Result<usize> {
        self.cluster_starts
            .get(index)
            .copied()
            .ok_or_else(|| out_of_range(index, self.len_clusters()))
    }

    /// Cluster index at codepoint `index`, rounding a position inside a
    /// cluster in the given direction.
    pub fn codepoint_to_cluster(&self, index: usize, rounding: Rounding) -> Result<usize> {
        round(&self.cluster_starts, index, rounding)
    }

    /// Convert a position between spaces.
    ///
    /// Going to a coarser space, a position inside a multi-element unit is
    /// rounded as requested.
    pub fn convert(&self, pos: usize, from: Space, to: Space, rounding: Rounding) -> Result<usize> {
        let codepoint = match from {
            Space::CodeUnit => self.unit_to_codepoint_rounded(pos, rounding)?,
            Space::Codepoint => {
                if pos > self.len_codepoints() {
                    return Err(out_of_range(pos, self.len_codepoints()));
                }
                pos
            }
            Space::Character => self.cluster_to_codepoint(pos)?,
        };
        match to {
            Space::CodeUnit => self.codepoint_to_unit(codepoint),
            Space::Codepoint => Ok(codepoint),
            Space::Character => self.codepoint_to_cluster(codepoint, rounding),
        }
    }

    /// Convert a range between spaces. The start rounds down and the end
    /// rounds up, so the result always covers the input.
    pub fn convert_range(
        &self,
        range: std::ops::Range<usize>,
        from: Space,
        to: Space,
    ) -> Result<std::ops::Range<usize>> {
        let start = self.convert(range.start, from, to, Rounding::Down)?;
        let end = self.convert(range.end, from, to, Rounding::Up)?;
        Ok(start..end.max(start))
    }
}

fn round(table: &[usize], pos: usize, rounding: Rounding) -> Result<usize> {
    match table.binary_search(&pos) {
        Ok(i) => Ok(i),
        Err(i) if i < table.len() => Ok(match rounding {
            Rounding::Down => i - 1,
            Rounding::Up => i,
        }),
        Err(_) => Err(out_of_range(pos, table.last().copied().unwrap_or(0))),
    }
}

#[allow(clippy::cast_possible_wrap)]
fn out_of_range(index: usize, len: usize) -> Error {
    Error::out_of_range(index as isize, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Three astral digits then '!': 7 units, 4 codepoints.
    const ASTRAL: &str = "\u{1D7D9}\u{1D7DA}\u{1D7DB}!";

    #[test]
    fn test_lengths() {
        let cache = BoundaryCache::build(ASTRAL, 0);
        assert_eq!(cache.len_units(), 7);
        assert_eq!(cache.len_codepoints(), 4);
        assert_eq!(cache.len_clusters(), 4);
        assert!(cache.is_fresh(0));
        assert!(!cache.is_fresh(1));
    }

    #[test]
    fn test_codepoint_unit_mapping() {
        let cache = BoundaryCache::build(ASTRAL, 0);
        assert_eq!(cache.codepoint_to_unit(0), Ok(0));
        assert_eq!(cache.codepoint_to_unit(3), Ok(6));
        assert_eq!(cache.codepoint_to_unit(4), Ok(7));
        assert!(cache.codepoint_to_unit(5).is_err());

        assert_eq!(cache.unit_to_codepoint(4), Ok(2));
        assert_eq!(
            cache.unit_to_codepoint(3),
            Err(Error::CodepointBoundaryViolation { offset: 3 })
        );
        assert!(matches!(
            cache.unit_to_codepoint(8),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rounding_inside_pair() {
        let cache = BoundaryCache::build(ASTRAL, 0);
        assert_eq!(cache.unit_to_codepoint_rounded(1, Rounding::Down), Ok(0));
        assert_eq!(cache.unit_to_codepoint_rounded(1, Rounding::Up), Ok(1));
        assert_eq!(cache.unit_to_codepoint_rounded(2, Rounding::Up), Ok(1));
    }

    #[test]
    fn test_convert_range() {
        let cache = BoundaryCache::build(ASTRAL, 0);
        assert_eq!(
            cache.convert_range(0..1, Space::CodeUnit, Space::Codepoint),
            Ok(0..1)
        );
        assert_eq!(
            cache.convert_range(0..3, Space::CodeUnit, Space::Codepoint),
            Ok(0..2)
        );
        assert_eq!(
            cache.convert_range(2..4, Space::Codepoint, Space::CodeUnit),
            Ok(4..7)
        );
    }

    #[test]
    fn test_clusters() {
        // "e" + combining acute, then "x": 2 clusters, 3 codepoints
        let cache = BoundaryCache::build("e\u{0301}x", 0);
        assert_eq!(cache.len_clusters(), 2);
        assert_eq!(cache.cluster_to_codepoint(1), Ok(2));
        assert_eq!(cache.codepoint_to_cluster(1, Rounding::Down), Ok(0));
        assert_eq!(cache.codepoint_to_cluster(1, Rounding::Up), Ok(1));
        assert_eq!(
            cache.convert_range(0..1, Space::Character, Space::CodeUnit),
            Ok(0..2)
        );
    }

    #[test]
    fn test_ensure_fresh_only_rebuilds_on_version_change() {
        let mut cache = BoundaryCache::build("abc", 1);
        cache.ensure_fresh(1, || unreachable!("fresh cache must not rebuild"));
        cache.ensure_fresh(2, || "abcd".to_string());
        assert_eq!(cache.len_codepoints(), 4);
        assert_eq!(cache.version(), Some(2));
    }

    #[test]
    fn test_empty() {
        let cache = BoundaryCache::build("", 0);
        assert_eq!(cache.len_units(), 0);
        assert_eq!(cache.len_codepoints(), 0);
        assert_eq!(cache.len_clusters(), 0);
        assert_eq!(cache.unit_to_codepoint(0), Ok(0));
    }
}
