//! Collation-based substring search.
//!
//! Instead of comparing code units, [`SearchSession`] compares sort keys:
//! a window of the haystack matches when the collator says it is equivalent
//! to the needle at the strength implied by the search flags. Windows are
//! whole grapheme clusters, so a match never ends between a base letter and
//! its combining marks.

use crate::config::default_locale;
use crate::locale::Locale;
use crate::text::{Space, TextBuffer};
use crate::unicode::{Collator, RootCollator, Strength, grapheme_indices, is_word_char};
use bitflags::bitflags;
use std::num::NonZeroUsize;
use std::ops::Range;
use unicode_normalization::UnicodeNormalization;

bitflags! {
    /// Search behaviour switches.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct SearchFlags: u8 {
        /// Ignore case differences (secondary strength).
        const IGNORE_CASE         = 0x01;
        /// Ignore case and accent differences (primary strength).
        const IGNORE_CASE_ACCENTS = 0x02;
        /// Only report matches not touching word characters on either side.
        const WHOLE_WORDS         = 0x04;
        /// Treat canonically equivalent sequences as equal. Keys are always
        /// built from decomposed text, so this holds whether or not the flag
        /// is set; it is accepted for callers that state it explicitly.
        const CANONICAL           = 0x08;
    }
}

/// Options for a collation search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Locale to collate under; the process default when `None`.
    pub locale: Option<Locale>,
    pub flags: SearchFlags,
    /// Stop after this many matches.
    pub limit: Option<NonZeroUsize>,
}

impl SearchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn locale(mut self, locale: impl Into<Locale>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn ignore_case(mut self) -> Self {
        self.flags |= SearchFlags::IGNORE_CASE;
        self
    }

    #[must_use]
    pub fn ignore_case_accents(mut self) -> Self {
        self.flags |= SearchFlags::IGNORE_CASE_ACCENTS;
        self
    }

    #[must_use]
    pub fn whole_words(mut self) -> Self {
        self.flags |= SearchFlags::WHOLE_WORDS;
        self
    }

    #[must_use]
    pub fn canonical(mut self) -> Self {
        self.flags |= SearchFlags::CANONICAL;
        self
    }

    /// Stop after `limit` matches; zero means unlimited.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = NonZeroUsize::new(limit);
        self
    }

    /// Collation strength implied by the flags.
    #[must_use]
    pub fn strength(&self) -> Strength {
        if self.flags.contains(SearchFlags::IGNORE_CASE_ACCENTS) {
            Strength::Primary
        } else if self.flags.contains(SearchFlags::IGNORE_CASE) {
            Strength::Secondary
        } else {
            Strength::Tertiary
        }
    }
}

/// A collation search over one buffer.
pub struct SearchSession<'a> {
    buffer: &'a TextBuffer,
    collator: Box<dyn Collator + 'a>,
    options: SearchOptions,
}

impl<'a> SearchSession<'a> {
    /// Search with the root collator for the options' locale.
    #[must_use]
    pub fn new(buffer: &'a TextBuffer, options: SearchOptions) -> Self {
        let locale = options.locale.clone().unwrap_or_else(default_locale);
        Self::with_collator(buffer, RootCollator::new(locale), options)
    }

    /// Search with a caller-supplied collator. The options' locale is
    /// ignored; the collator was built for its own.
    #[must_use]
    pub fn with_collator(
        buffer: &'a TextBuffer,
        collator: impl Collator + 'a,
        options: SearchOptions,
    ) -> Self {
        Self {
            buffer,
            collator: Box::new(collator),
            options,
        }
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Matches of `needle` as grapheme cluster ranges.
    #[must_use]
    pub fn find_all(&self, needle: &str) -> Vec<Range<usize>> {
        self.find_all_in(needle, Space::Character)
    }

    /// First match of `needle` as a grapheme cluster range.
    #[must_use]
    pub fn find_first(&self, needle: &str) -> Option<Range<usize>> {
        self.cluster_matches(needle, 1).into_iter().next()
    }

    /// Matches of `needle` as ranges in `space`.
    #[must_use]
    pub fn find_all_in(&self, needle: &str, space: Space) -> Vec<Range<usize>> {
        let limit = self.options.limit.map_or(usize::MAX, NonZeroUsize::get);
        let clusters = self.cluster_matches(needle, limit);
        if space == Space::Character {
            return clusters;
        }
        clusters
            .into_iter()
            .filter_map(|r| {
                self.buffer
                    .convert_range(r, Space::Character, space)
                    .ok()
            })
            .collect()
    }

    fn cluster_matches(&self, needle: &str, limit: usize) -> Vec<Range<usize>> {
        if needle.is_empty() {
            return Vec::new();
        }
        let _scan = self.buffer.begin_scan();
        let text = self.buffer.text();
        let strength = self.options.strength();
        let whole_words = self.options.flags.contains(SearchFlags::WHOLE_WORDS);

        let mut starts: Vec<usize> = grapheme_indices(&text).map(|(i, _)| i).collect();
        starts.push(text.len());
        let n = starts.len() - 1;

        let key = self.collator.sort_key(needle, strength);
        // An expansion can map one cluster to two letters or fold two into one.
        let max_window = needle.nfd().count() * 2 + 1;
        tracing::debug!(
            needle,
            ?strength,
            clusters = n,
            "collation search started"
        );

        let mut out = Vec::new();
        let mut s = 0;
        while s < n && out.len() < limit {
            let hit = (s + 1..=n.min(s + max_window)).find(|&end| {
                let (from, to) = (starts[s], starts[end]);
                self.collator.sort_key(&text[from..to], strength) == key
                    && (!whole_words || word_bounded(&text, from, to))
            });
            match hit {
                Some(end) => {
                    tracing::trace!(start = s, end, "collation match");
                    out.push(s..end);
                    s = end;
                }
                None => s += 1,
            }
        }
        out
    }
}

/// Whether the bytes `from..to` of `text` are not flanked by word characters.
fn word_bounded(text: &str, from: usize, to: usize) -> bool {
    let before = text[..from].chars().next_back();
    let after = text[to..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
