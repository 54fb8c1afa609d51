//! Property-based tests for index resolution, space conversion and
//! pattern scanning.
//!
//! Uses proptest to verify invariants that must hold across all valid inputs.

use proptest::prelude::*;
use unitext::text::{Rounding, Space, TextBuffer, resolve_range};
use unitext::{Pattern, UString};

// ============================================================================
// Strategies
// ============================================================================

/// Generate arbitrary UTF-8 strings (proptest default).
fn utf8_string() -> impl Strategy<Value = String> {
    "\\PC{0,60}"
}

/// Strings mixing BMP text, astral symbols and combining marks.
fn mixed_string() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["a", "Ж", "e\u{0301}", "\u{1D7D9}", "😀", " ", "🇺🇸", ","]),
        0..30,
    )
    .prop_map(|parts| parts.concat())
}

#[derive(Clone, Debug)]
enum Edit {
    Write { at: usize, len: usize, text: String },
    Append(String),
    SetText(String),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..40, 0usize..4, mixed_string())
            .prop_map(|(at, len, text)| Edit::Write { at, len, text }),
        mixed_string().prop_map(Edit::Append),
        mixed_string().prop_map(Edit::SetText),
    ]
}

/// Apply `edit` to both the buffer and a plain `String` model.
fn apply(buf: &TextBuffer, model: &mut String, edit: &Edit) {
    match edit {
        Edit::Write { at, len, text } => {
            let n = buf.len_codepoints();
            let start = (*at).min(n);
            let end = (start + len).min(n);
            let units = buf
                .convert_range(start..end, Space::Codepoint, Space::CodeUnit)
                .unwrap();
            buf.write(units, text).unwrap();
            let byte = |cp: usize| model.char_indices().nth(cp).map_or(model.len(), |(b, _)| b);
            let bytes = byte(start)..byte(end);
            model.replace_range(bytes, text);
        }
        Edit::Append(text) => {
            buf.append(text).unwrap();
            model.push_str(text);
        }
        Edit::SetText(text) => {
            buf.set_text(text).unwrap();
            model.clone_from(text);
        }
    }
}

// ============================================================================
// Index resolution
// ============================================================================

proptest! {
    /// A resolved range always lies inside the text.
    #[test]
    fn resolved_ranges_are_in_bounds(
        len in 0usize..50,
        start in -60isize..60,
        end in -60isize..60,
    ) {
        if let Ok(range) = resolve_range(start..end, len) {
            prop_assert!(range.start <= range.end);
            prop_assert!(range.end <= len);
        }
    }

    /// Slicing never fails for a start inside the text.
    #[test]
    fn slices_from_valid_start(s in mixed_string(), start in 0isize..40) {
        let u = UString::from(s.as_str());
        let got = u.get(start..);
        prop_assert_eq!(got.is_some(), (start as usize) <= u.len());
    }
}

// ============================================================================
// Space conversion
// ============================================================================

proptest! {
    /// Converting a codepoint index to code units and back is lossless,
    /// including after any sequence of edits.
    #[test]
    fn codepoint_unit_round_trip(
        s in utf8_string(),
        edits in prop::collection::vec(edit(), 0..6),
    ) {
        let buf = TextBuffer::with_text(&s);
        let mut model = s.clone();
        for e in &edits {
            // Warm the boundary cache so stale tables would be caught.
            buf.convert(0, Space::Codepoint, Space::CodeUnit, Rounding::Down).unwrap();
            apply(&buf, &mut model, e);
        }
        prop_assert_eq!(buf.text(), model.as_str());
        prop_assert_eq!(buf.len(), model.encode_utf16().count());
        prop_assert_eq!(buf.len_codepoints(), model.chars().count());
        for cp in 0..=buf.len_codepoints() {
            let unit = buf
                .convert(cp, Space::Codepoint, Space::CodeUnit, Rounding::Down)
                .unwrap();
            let back = buf
                .convert(unit, Space::CodeUnit, Space::Codepoint, Rounding::Down)
                .unwrap();
            prop_assert_eq!(back, cp);
            let expected: usize = model.chars().take(cp).map(char::len_utf16).sum();
            prop_assert_eq!(unit, expected);
        }
    }

    /// Cluster boundaries map to increasing codepoint offsets.
    #[test]
    fn cluster_offsets_increase(s in mixed_string()) {
        let buf = TextBuffer::with_text(&s);
        let mut last = None;
        for cluster in 0..=buf.len_chars() {
            let cp = buf
                .convert(cluster, Space::Character, Space::Codepoint, Rounding::Down)
                .unwrap();
            if let Some(prev) = last {
                prop_assert!(cp > prev);
            }
            last = Some(cp);
        }
        prop_assert_eq!(last, Some(buf.len_codepoints()));
    }

    /// Lengths in the three spaces are ordered.
    #[test]
    fn space_lengths_are_ordered(s in utf8_string()) {
        let u = UString::from(s.as_str());
        prop_assert!(u.len_chars() <= u.len());
        prop_assert!(u.len() <= u.len_units());
        prop_assert_eq!(u.len_units(), s.encode_utf16().count());
    }
}

// ============================================================================
// Scanning
// ============================================================================

proptest! {
    /// Matches come out in order and never overlap.
    #[test]
    fn scan_matches_do_not_overlap(s in mixed_string()) {
        let u = UString::from(s.as_str());
        let pattern = Pattern::new(r"\w*").unwrap();
        let mut last_end = 0;
        for m in u.matches(&pattern) {
            let range = m.unit_range();
            prop_assert!(range.start >= last_end);
            prop_assert!(range.end <= u.len_units());
            last_end = range.end.max(range.start);
        }
    }

    /// Splitting on a delimiter and joining restores the text when trailing
    /// empty pieces are kept.
    #[test]
    fn split_join_restores_text(s in mixed_string()) {
        let u = UString::from(s.as_str());
        let pieces: Vec<String> = u
            .split_limit(",", -1)
            .iter()
            .map(ToString::to_string)
            .collect();
        if s.is_empty() {
            prop_assert!(pieces.is_empty());
        } else {
            prop_assert_eq!(pieces.join(","), s);
        }
    }

    /// gsub with an identity template leaves the text unchanged.
    #[test]
    fn identity_gsub(s in utf8_string()) {
        let u = UString::from(s.as_str());
        let pattern = Pattern::new("(.)").unwrap();
        prop_assert_eq!(u.gsub(&pattern, "$1").to_string(), s);
    }
}
