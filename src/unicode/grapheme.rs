//! Grapheme cluster iteration.

use unicode_segmentation::UnicodeSegmentation;

/// Iterator over grapheme clusters in a string.
pub struct GraphemeIterator<'a> {
    inner: unicode_segmentation::Graphemes<'a>,
}

impl<'a> Iterator for GraphemeIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Iterate over extended grapheme clusters in a string.
#[must_use]
pub fn graphemes(s: &str) -> GraphemeIterator<'_> {
    GraphemeIterator {
        inner: s.graphemes(true),
    }
}

/// Iterate over grapheme clusters with byte indices.
pub fn grapheme_indices(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.grapheme_indices(true)
}

/// Codepoint index at which each grapheme cluster starts.
///
/// The returned table has one extra trailing entry equal to the total
/// codepoint count, so cluster `g` spans `starts[g]..starts[g + 1]`.
#[must_use]
pub fn cluster_starts(s: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut cp = 0usize;
    for grapheme in s.graphemes(true) {
        starts.push(cp);
        cp += grapheme.chars().count();
    }
    starts.push(cp);
    starts
}

/// Whether `c` is a combining mark (general category M*).
#[must_use]
#[inline]
pub fn is_combining_mark(c: char) -> bool {
    unicode_normalization::char::is_combining_mark(c)
}

/// Whether `c` counts as part of a word for whole-word matching.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_combining_mark(c)
}
