//! Text segmentation: words, sentences and line-break opportunities.
//!
//! Every function returns byte ranges that tile the input exactly, so the
//! segments joined back together reproduce the original text.

use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Segmentation granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    /// Extended grapheme clusters.
    Character,
    /// Word boundaries (UAX #29). Punctuation and spaces form their own
    /// segments.
    Word,
    /// Sentence boundaries (UAX #29).
    Sentence,
    /// Line-break opportunities.
    Line,
}

/// Type of line break opportunity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakType {
    /// Mandatory break after LF, CR or CRLF.
    Hard,
    /// Whitespace (space, tab).
    Whitespace,
    /// Punctuation that allows breaking after.
    Punctuation,
    /// Closing bracket/paren.
    CloseBracket,
    /// Hyphen or dash.
    Hyphen,
}

/// Byte ranges of the segments of `text` at `granularity`.
#[must_use]
pub fn segments(text: &str, granularity: Granularity) -> Vec<Range<usize>> {
    match granularity {
        Granularity::Character => text
            .grapheme_indices(true)
            .map(|(i, g)| i..i + g.len())
            .collect(),
        Granularity::Word => text
            .split_word_bound_indices()
            .map(|(i, w)| i..i + w.len())
            .collect(),
        Granularity::Sentence => text
            .split_sentence_bound_indices()
            .map(|(i, s)| i..i + s.len())
            .collect(),
        Granularity::Line => line_segments(text),
    }
}

/// Find all line-break opportunities in a string.
///
/// Returns the byte offset just after each opportunity along with its type.
/// Breaks are allowed after whitespace runs, after sentence punctuation,
/// after closing brackets and after hyphens; LF, CR and CRLF are mandatory.
#[must_use]
pub fn find_line_breaks(text: &str) -> Vec<(usize, BreakType)> {
    let mut breaks = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        let next = chars.peek().map(|&(_, c)| c);
        let break_type = match ch {
            '\r' if next == Some('\n') => None,
            '\n' | '\r' => Some(BreakType::Hard),
            // Only break at the end of a run of spaces.
            ' ' | '\t' if matches!(next, Some(' ' | '\t')) => None,
            ' ' | '\t' => Some(BreakType::Whitespace),
            '.' | ',' | ';' | ':' | '!' | '?' => Some(BreakType::Punctuation),
            ')' | ']' | '}' => Some(BreakType::CloseBracket),
            '-' | '\u{2010}' | '\u{2012}' | '\u{2013}' | '\u{2014}' => Some(BreakType::Hyphen),
            _ => None,
        };

        if let Some(bt) = break_type {
            let end = i + ch.len_utf8();
            // Punctuation followed by more punctuation or a space breaks later.
            let defer = bt != BreakType::Hard
                && bt != BreakType::Whitespace
                && next.is_some_and(|c| c == ' ' || c == '\t' || is_break_char(c));
            if !defer && end < text.len() {
                breaks.push((end, bt));
            }
        }
    }

    breaks
}

fn line_segments(text: &str) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (end, _) in find_line_breaks(text) {
        out.push(start..end);
        start = end;
    }
    if start < text.len() {
        out.push(start..text.len());
    }
    out
}

/// Check if a character is a potential break point.
fn is_break_char(ch: char) -> bool {
    matches!(
        ch,
        '.' | ',' | ';' | ':' | '!' | '?' | '-' | ')' | ']' | '}'
    )
}
