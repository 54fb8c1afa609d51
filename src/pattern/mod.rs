//! Pattern-driven matching and editing.
//!
//! A [`Matcher`] finds the next match in a [`Haystack`] at or after a code
//! unit offset. [`Pattern`] is the regex implementation; plain strings
//! match literally. [`PatternSession`] drives a matcher across a buffer
//! under its scan guard and turns the hits into scans, splits and
//! substitutions.

mod haystack;
mod matched;
mod regex;
mod session;
mod template;

pub use haystack::Haystack;
pub use matched::Match;
pub use regex::Pattern;
pub use session::{Commit, PatternSession, Replaced, SessionState};
pub use template::{Replacer, Template};

use bitflags::bitflags;
use std::ops::Range;

bitflags! {
    /// Pattern compile options.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct PatternFlags: u8 {
        /// Case-insensitive matching.
        const IGNORE_CASE = 0x01;
        /// `^` and `$` match at line boundaries.
        const MULTILINE   = 0x02;
        /// `.` also matches line terminators.
        const DOT_ALL     = 0x04;
        /// The pattern text is a literal string, not a regex.
        const LITERAL     = 0x08;
    }
}

/// Capture ranges of one match, in code units.
///
/// Group 0 is the whole match and is always set. Other groups are `None`
/// when they took no part in the match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMatch {
    pub groups: Vec<Option<Range<usize>>>,
}

impl RawMatch {
    /// Whole-match range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.groups.first().cloned().flatten().unwrap_or(0..0)
    }
}

/// A matching engine.
pub trait Matcher {
    /// First match starting at or after code unit `from`.
    fn find(&self, hay: &Haystack, from: usize) -> Option<RawMatch>;

    /// Number of capture groups, not counting the whole match.
    fn group_count(&self) -> usize;
}

/// What to look for: an exact string or a compiled matcher.
#[derive(Clone, Copy)]
pub enum Needle<'a> {
    Literal(&'a str),
    Compiled(&'a dyn Matcher),
}

impl Matcher for Needle<'_> {
    fn find(&self, hay: &Haystack, from: usize) -> Option<RawMatch> {
        match self {
            Needle::Literal(lit) => find_literal(hay, lit, from),
            Needle::Compiled(m) => m.find(hay, from),
        }
    }

    fn group_count(&self) -> usize {
        match self {
            Needle::Literal(_) => 0,
            Needle::Compiled(m) => m.group_count(),
        }
    }
}

fn find_literal(hay: &Haystack, lit: &str, from: usize) -> Option<RawMatch> {
    if from > hay.len_units() {
        return None;
    }
    let start = hay.unit_to_byte(from);
    let at = start + hay.as_str()[start..].find(lit)?;
    let range = hay.byte_to_unit(at)..hay.byte_to_unit(at + lit.len());
    Some(RawMatch {
        groups: vec![Some(range)],
    })
}

impl std::fmt::Debug for Needle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Needle::Literal(lit) => f.debug_tuple("Literal").field(lit).finish(),
            Needle::Compiled(m) => f
                .debug_struct("Compiled")
                .field("groups", &m.group_count())
                .finish(),
        }
    }
}

impl<'a> From<&'a str> for Needle<'a> {
    fn from(lit: &'a str) -> Self {
        Needle::Literal(lit)
    }
}

impl<'a> From<&'a String> for Needle<'a> {
    fn from(lit: &'a String) -> Self {
        Needle::Literal(lit)
    }
}

impl<'a> From<&'a Pattern> for Needle<'a> {
    fn from(pattern: &'a Pattern) -> Self {
        Needle::Compiled(pattern)
    }
}
