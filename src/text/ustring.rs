//! The Unicode string value.
//!
//! [`UString`] wraps a [`TextBuffer`] with the operations applications
//! perform on text: slicing by signed indices and ranges, pattern lookups,
//! substitution, splitting, case mapping, normalization, collation and
//! segment iteration. Unless a method says otherwise, positions are
//! codepoint indices.
//!
//! Every method that changes the value checks the buffer's scan guard
//! first. Inside a callback of a scan over `s`, reads of `s` and nested
//! read-only scans of `s` work; any change to `s` fails with
//! [`Error::ConcurrentMutation`] and the outer operation is abandoned.
//!
//! ```
//! use unitext::{Pattern, UString};
//!
//! let s = UString::from("hello there");
//! assert_eq!(s.get(1..4).unwrap(), "ell");
//! assert_eq!(s.get(-4..=-2).unwrap(), "her");
//!
//! let vowels = Pattern::new("([aeiou])").unwrap();
//! assert_eq!(s.gsub(&vowels, "<$1>"), "h<e>ll<o> th<e>r<e>");
//! ```

use crate::config::{config, default_locale};
use crate::convert::Converter;
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::pattern::{
    Commit, Haystack, Match, Matcher, Needle, PatternSession, Replaced, Replacer, Template,
};
use crate::search::{SearchOptions, SearchSession};
use crate::text::boundary::Rounding;
use crate::text::buffer::TextBuffer;
use crate::text::index::{Access, Space, resolve_index, resolve_range, resolve_span};
use crate::unicode::{
    Collator, Granularity, NormalForm, Normalizer, RootCollator, Strength, UnicodeNormalizer,
    fold, graphemes, normalize_nfc, segments, to_lower, to_upper, unescape,
};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, ControlFlow, Range, RangeBounds};
use std::rc::Rc;

/// A mutable Unicode string with codepoint, code unit and grapheme views.
#[derive(Clone, Default)]
pub struct UString {
    buf: TextBuffer,
}

impl UString {
    /// An empty string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from codepoint values.
    pub fn from_codepoints(codepoints: &[u32]) -> Result<Self> {
        let text = codepoints
            .iter()
            .map(|&cp| char::from_u32(cp).ok_or(Error::InvalidCodepoint(cp)))
            .collect::<Result<String>>()?;
        Ok(Self::from(text))
    }

    /// Decode bytes in the charset named by `label`.
    pub fn from_encoded(bytes: &[u8], label: &str) -> Result<Self> {
        Ok(Self::from(Converter::new(label)?.decode(bytes)))
    }

    /// Encode into the charset named by `label`.
    pub fn to_encoded(&self, label: &str) -> Result<Vec<u8>> {
        Ok(Converter::new(label)?.encode(&self.text()))
    }

    /// Decode backslash escapes such as `A` or `\x{1D7D9}`.
    pub fn unescape(&self) -> Result<Self> {
        unescape(&self.text()).map(Self::from)
    }

    /// The underlying buffer.
    #[must_use]
    pub fn as_buffer(&self) -> &TextBuffer {
        &self.buf
    }

    /// Buffer version; changes on every write.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.buf.version()
    }

    fn text(&self) -> String {
        self.buf.text()
    }

    // ------------------------------------------------------------------
    // Lengths and views
    // ------------------------------------------------------------------

    /// Length in codepoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len_codepoints()
    }

    /// Length in UTF-16 code units.
    #[must_use]
    pub fn len_units(&self) -> usize {
        self.buf.len()
    }

    /// Length in grapheme clusters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.buf.len_chars()
    }

    /// Length in `space`.
    #[must_use]
    pub fn len_in(&self, space: Space) -> usize {
        self.buf.len_in(space)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Codepoint values.
    #[must_use]
    pub fn codepoints(&self) -> Vec<u32> {
        self.text().chars().map(u32::from).collect()
    }

    /// Grapheme clusters, each composed to NFC.
    #[must_use]
    pub fn chars(&self) -> Vec<Self> {
        let text = self.text();
        graphemes(&text).map(|g| Self::from(normalize_nfc(g))).collect()
    }

    /// Slice by grapheme cluster range, composed to NFC.
    #[must_use]
    pub fn char_span<R: RangeBounds<isize>>(&self, range: R) -> Option<Self> {
        self.get_in(Space::Character, range)
            .map(|s| s.normalize(NormalForm::Nfc))
    }

    /// Convert a code unit range to the codepoints it touches.
    #[must_use]
    pub fn conv_unit_range<R: RangeBounds<isize>>(&self, range: R) -> Option<Range<usize>> {
        let units = resolve_range(range, self.len_units()).ok()?;
        self.buf
            .convert_range(units, Space::CodeUnit, Space::Codepoint)
            .ok()
    }

    /// Convert a codepoint range to code units.
    #[must_use]
    pub fn conv_point_range<R: RangeBounds<isize>>(&self, range: R) -> Option<Range<usize>> {
        let points = resolve_range(range, self.len()).ok()?;
        self.units(points).ok()
    }

    fn units(&self, points: Range<usize>) -> Result<Range<usize>> {
        self.units_in(Space::Codepoint, points)
    }

    fn units_in(&self, space: Space, range: Range<usize>) -> Result<Range<usize>> {
        if space == Space::CodeUnit {
            return Ok(range);
        }
        self.buf.convert_range(range, space, Space::CodeUnit)
    }

    fn unit_at(&self, point: usize) -> Result<usize> {
        self.buf
            .convert(point, Space::Codepoint, Space::CodeUnit, Rounding::Down)
    }

    fn point_at(&self, unit: usize) -> Result<usize> {
        self.buf
            .convert(unit, Space::CodeUnit, Space::Codepoint, Rounding::Down)
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    /// Substring by codepoint range. `None` if the start is out of range.
    #[must_use]
    pub fn get<R: RangeBounds<isize>>(&self, range: R) -> Option<Self> {
        self.get_in(Space::Codepoint, range)
    }

    /// Substring by a range in `space`.
    #[must_use]
    pub fn get_in<R: RangeBounds<isize>>(&self, space: Space, range: R) -> Option<Self> {
        let range = resolve_range(range, self.len_in(space)).ok()?;
        let units = self.units_in(space, range).ok()?;
        self.buf.read(units).ok().map(Self::from)
    }

    /// The codepoint at `index`.
    #[must_use]
    pub fn get_at(&self, index: isize) -> Option<Self> {
        let i = resolve_index(index, self.len(), Access::Read).ok()?;
        self.get_in(Space::Codepoint, i as isize..=i as isize)
    }

    /// `count` codepoints from `start`.
    #[must_use]
    pub fn get_span(&self, start: isize, count: isize) -> Option<Self> {
        let range = resolve_span(start, count, self.len()).ok()?;
        self.buf.read(self.units(range).ok()?).ok().map(Self::from)
    }

    /// Text of `group` in the first match of `needle`. Negative groups
    /// count back from the last capture group.
    #[must_use]
    pub fn get_match<'n>(&self, needle: impl Into<Needle<'n>>, group: isize) -> Option<Self> {
        let m = self.match_first(needle)?;
        m.get(m.signed_group(group)?).map(Self::from)
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    fn haystack(&self) -> Haystack {
        Haystack::from_rope(self.buf.snapshot())
    }

    /// First match of `needle`.
    #[must_use]
    pub fn match_first<'n>(&self, needle: impl Into<Needle<'n>>) -> Option<Match> {
        let needle = needle.into();
        let hay = Rc::new(self.haystack());
        let raw = needle.find(&hay, 0)?;
        Some(Match::new(hay, raw))
    }

    /// Whether `needle` occurs anywhere.
    #[must_use]
    pub fn is_match<'n>(&self, needle: impl Into<Needle<'n>>) -> bool {
        self.match_first(needle).is_some()
    }

    /// Whether the literal `needle` occurs anywhere.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.text().contains(needle)
    }

    /// Codepoint index of the first match.
    #[must_use]
    pub fn index<'n>(&self, needle: impl Into<Needle<'n>>) -> Option<usize> {
        self.index_from(needle, 0)
    }

    /// Codepoint index of the first match starting at or after `from`.
    #[must_use]
    pub fn index_from<'n>(&self, needle: impl Into<Needle<'n>>, from: isize) -> Option<usize> {
        let needle = needle.into();
        let start = resolve_index(from, self.len(), Access::Insert).ok()?;
        let hay = self.haystack();
        let raw = needle.find(&hay, self.unit_at(start).ok()?)?;
        self.point_at(raw.range().start).ok()
    }

    /// Codepoint index of the last match.
    #[must_use]
    pub fn rindex<'n>(&self, needle: impl Into<Needle<'n>>) -> Option<usize> {
        self.rindex_at(needle.into(), self.len())
    }

    /// Codepoint index of the last match starting at or before `from`.
    #[must_use]
    pub fn rindex_from<'n>(&self, needle: impl Into<Needle<'n>>, from: isize) -> Option<usize> {
        let start = resolve_index(from, self.len(), Access::Insert).ok()?;
        self.rindex_at(needle.into(), start)
    }

    fn rindex_at(&self, needle: Needle<'_>, start: usize) -> Option<usize> {
        let hay = self.haystack();
        let limit = self.unit_at(start).ok()?;
        let found = match needle {
            Needle::Literal(lit) => {
                let text = hay.as_str();
                // A match starting at `limit` may run past it.
                let mut end = (hay.unit_to_byte(limit) + lit.len()).min(text.len());
                while !text.is_char_boundary(end) {
                    end -= 1;
                }
                hay.byte_to_unit(text[..end].rfind(lit)?)
            }
            Needle::Compiled(_) => {
                // Step one codepoint past each match start so overlapping
                // candidates are still seen.
                let mut last = None;
                let mut from = 0;
                while let Some(m) = needle.find(&hay, from) {
                    let at = m.range().start;
                    if at > limit {
                        break;
                    }
                    last = Some(at);
                    match hay.next_boundary(at) {
                        Some(next) => from = next,
                        None => break,
                    }
                }
                last?
            }
        };
        self.point_at(found).ok()
    }

    // ------------------------------------------------------------------
    // Scanning and splitting
    // ------------------------------------------------------------------

    /// All matches, left to right and non-overlapping.
    #[must_use]
    pub fn matches<'n>(&self, needle: impl Into<Needle<'n>>) -> Vec<Match> {
        let needle = needle.into();
        PatternSession::new(&self.buf, &needle).matches()
    }

    /// Text of every match.
    #[must_use]
    pub fn scan<'n>(&self, needle: impl Into<Needle<'n>>) -> Vec<Self> {
        self.matches(needle)
            .iter()
            .map(|m| Self::from(m.as_str()))
            .collect()
    }

    /// Capture groups of every match; unset groups are `None`.
    #[must_use]
    pub fn scan_groups<'n>(&self, needle: impl Into<Needle<'n>>) -> Vec<Vec<Option<Self>>> {
        self.matches(needle)
            .iter()
            .map(|m| m.iter().skip(1).map(|g| g.map(Self::from)).collect())
            .collect()
    }

    /// Call `f` for each match while the string is locked against writes.
    pub fn scan_with<'n, F>(&self, needle: impl Into<Needle<'n>>, f: F) -> Result<usize>
    where
        F: FnMut(&Match) -> Result<ControlFlow<()>>,
    {
        let needle = needle.into();
        PatternSession::new(&self.buf, &needle).scan_all(f)
    }

    /// Split around matches, dropping trailing empty pieces.
    #[must_use]
    pub fn split<'n>(&self, needle: impl Into<Needle<'n>>) -> Vec<Self> {
        self.split_limit(needle, 0)
    }

    /// Split around matches. `limit > 0` caps the number of pieces;
    /// `limit < 0` keeps trailing empty pieces.
    #[must_use]
    pub fn split_limit<'n>(&self, needle: impl Into<Needle<'n>>, limit: isize) -> Vec<Self> {
        let needle = needle.into();
        PatternSession::new(&self.buf, &needle)
            .split(limit)
            .into_iter()
            .map(Self::from)
            .collect()
    }

    // ------------------------------------------------------------------
    // Substitution
    // ------------------------------------------------------------------

    fn substitute(
        &self,
        needle: Needle<'_>,
        replacer: impl Replacer,
        commit: Commit,
        first_only: bool,
    ) -> Result<Replaced> {
        let mut session = PatternSession::new(&self.buf, &needle);
        if first_only {
            session.replace_first(replacer, commit)
        } else {
            session.replace_all(replacer, commit)
        }
    }

    /// Template substitution into a copy; rendering has no error path.
    fn substitute_template(&self, needle: Needle<'_>, template: &str, first_only: bool) -> Self {
        let template = Template::parse(template);
        let matches = if first_only {
            self.match_first(needle).into_iter().collect()
        } else {
            self.matches(needle)
        };
        let hay = self.haystack();
        let mut out = String::with_capacity(hay.as_str().len());
        let mut last = 0;
        for m in &matches {
            let units = m.unit_range();
            out.push_str(hay.slice_units(last..units.start));
            template.expand(m, &mut out);
            last = units.end;
        }
        out.push_str(hay.slice_units(last..hay.len_units()));
        Self::from(out)
    }

    /// Copy with the first match replaced by `template` (`$1` inserts a group).
    #[must_use]
    pub fn sub<'n>(&self, needle: impl Into<Needle<'n>>, template: &str) -> Self {
        self.substitute_template(needle.into(), template, true)
    }

    /// Copy with every match replaced by `template`.
    #[must_use]
    pub fn gsub<'n>(&self, needle: impl Into<Needle<'n>>, template: &str) -> Self {
        self.substitute_template(needle.into(), template, false)
    }

    /// Copy with the first match replaced by the callback's result.
    pub fn sub_with<'n, F>(&self, needle: impl Into<Needle<'n>>, f: F) -> Result<Self>
    where
        F: FnMut(&Match) -> Result<ControlFlow<(), String>>,
    {
        let replaced = self.substitute(needle.into(), f, Commit::Detached, true)?;
        Ok(Self::from(replaced.text))
    }

    /// Copy with every match replaced by the callback's result.
    pub fn gsub_with<'n, F>(&self, needle: impl Into<Needle<'n>>, f: F) -> Result<Self>
    where
        F: FnMut(&Match) -> Result<ControlFlow<(), String>>,
    {
        let replaced = self.substitute(needle.into(), f, Commit::Detached, false)?;
        Ok(Self::from(replaced.text))
    }

    /// Replace the first match in place. Returns whether anything matched.
    pub fn sub_in_place<'n>(&self, needle: impl Into<Needle<'n>>, template: &str) -> Result<bool> {
        let replaced =
            self.substitute(needle.into(), Template::parse(template), Commit::InPlace, true)?;
        Ok(replaced.count > 0)
    }

    /// Replace every match in place. Returns the number replaced.
    pub fn gsub_in_place<'n>(
        &self,
        needle: impl Into<Needle<'n>>,
        template: &str,
    ) -> Result<usize> {
        let replaced =
            self.substitute(needle.into(), Template::parse(template), Commit::InPlace, false)?;
        Ok(replaced.count)
    }

    /// Replace the first match in place with the callback's result.
    pub fn sub_in_place_with<'n, F>(&self, needle: impl Into<Needle<'n>>, f: F) -> Result<bool>
    where
        F: FnMut(&Match) -> Result<ControlFlow<(), String>>,
    {
        Ok(self.substitute(needle.into(), f, Commit::InPlace, true)?.count > 0)
    }

    /// Replace every match in place with the callback's result. Nothing is
    /// written unless every callback succeeds.
    pub fn gsub_in_place_with<'n, F>(&self, needle: impl Into<Needle<'n>>, f: F) -> Result<usize>
    where
        F: FnMut(&Match) -> Result<ControlFlow<(), String>>,
    {
        Ok(self.substitute(needle.into(), f, Commit::InPlace, false)?.count)
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    fn check_mutable(&self) -> Result<()> {
        self.buf.guard().assert_mutable()
    }

    /// Replace a codepoint range.
    pub fn set_range<R: RangeBounds<isize>>(&self, range: R, text: &str) -> Result<()> {
        self.check_mutable()?;
        let range = resolve_range(range, self.len())?;
        self.buf.write(self.units(range)?, text)
    }

    /// Replace a range in `space`. A grapheme range widens to whole
    /// clusters; a code unit range must not split a surrogate pair.
    ///
    /// ```
    /// use unitext::{Space, UString};
    ///
    /// let s = UString::from("e\u{301}x");
    /// s.set_in(Space::Character, 0..1, "a").unwrap();
    /// assert_eq!(s, "ax");
    /// ```
    pub fn set_in<R: RangeBounds<isize>>(&self, space: Space, range: R, text: &str) -> Result<()> {
        self.check_mutable()?;
        let range = resolve_range(range, self.len_in(space))?;
        self.buf.write(self.units_in(space, range)?, text)
    }

    /// Replace the codepoint at `index`.
    pub fn set_at(&self, index: isize, text: &str) -> Result<()> {
        self.check_mutable()?;
        let i = resolve_index(index, self.len(), Access::Read)?;
        self.buf.write(self.units(i..i + 1)?, text)
    }

    /// Replace `count` codepoints from `start`.
    pub fn set_span(&self, start: isize, count: isize, text: &str) -> Result<()> {
        self.check_mutable()?;
        let range = resolve_span(start, count, self.len())?;
        self.buf.write(self.units(range)?, text)
    }

    /// Replace `group` of the first match of `needle`. Fails with
    /// `IndexOutOfRange` if nothing matches or the group is not set.
    pub fn set_match<'n>(
        &self,
        needle: impl Into<Needle<'n>>,
        group: isize,
        text: &str,
    ) -> Result<()> {
        self.check_mutable()?;
        let m = self
            .match_first(needle)
            .ok_or(Error::IndexOutOfRange { index: 0, len: 0 })?;
        let units = m
            .signed_group(group)
            .and_then(|g| m.group_units(g))
            .ok_or_else(|| Error::out_of_range(group, m.group_len()))?;
        self.buf.write(units, text)
    }

    /// Insert before codepoint `index`. A negative index inserts after the
    /// codepoint it addresses, so `-1` appends.
    pub fn insert(&self, index: isize, text: &str) -> Result<()> {
        self.check_mutable()?;
        let len = self.len();
        let pos = if index < 0 {
            len as isize + index + 1
        } else {
            index
        };
        if pos < 0 || pos as usize > len {
            return Err(Error::out_of_range(index, len));
        }
        let unit = self.unit_at(pos as usize)?;
        self.buf.write(unit..unit, text)
    }

    fn take(&self, units: Option<Range<usize>>) -> Result<Option<Self>> {
        let Some(units) = units else {
            return Ok(None);
        };
        let removed = self.buf.read(units.clone())?;
        self.buf.write(units, "")?;
        Ok(Some(Self::from(removed)))
    }

    /// Remove and return the codepoint at `index`.
    pub fn remove_at(&self, index: isize) -> Result<Option<Self>> {
        self.check_mutable()?;
        let units = match resolve_index(index, self.len(), Access::Read) {
            Ok(i) => Some(self.units(i..i + 1)?),
            Err(_) => None,
        };
        self.take(units)
    }

    /// Remove and return a codepoint range.
    pub fn remove_range<R: RangeBounds<isize>>(&self, range: R) -> Result<Option<Self>> {
        self.check_mutable()?;
        let units = match resolve_range(range, self.len()) {
            Ok(r) => Some(self.units(r)?),
            Err(_) => None,
        };
        self.take(units)
    }

    /// Remove and return a range in `space`, widened to whole clusters in
    /// grapheme space.
    pub fn remove_in<R: RangeBounds<isize>>(&self, space: Space, range: R) -> Result<Option<Self>> {
        self.check_mutable()?;
        let units = match resolve_range(range, self.len_in(space)) {
            Ok(r) => Some(self.units_in(space, r)?),
            Err(_) => None,
        };
        self.take(units)
    }

    /// Remove and return `count` codepoints from `start`.
    pub fn remove_span(&self, start: isize, count: isize) -> Result<Option<Self>> {
        self.check_mutable()?;
        let units = match resolve_span(start, count, self.len()) {
            Ok(r) => Some(self.units(r)?),
            Err(_) => None,
        };
        self.take(units)
    }

    /// Remove and return the first match of `needle`.
    pub fn remove_match<'n>(&self, needle: impl Into<Needle<'n>>) -> Result<Option<Self>> {
        self.check_mutable()?;
        let units = self.match_first(needle).map(|m| m.unit_range());
        self.take(units)
    }

    /// Append text.
    pub fn push_str(&self, text: &str) -> Result<()> {
        self.buf.append(text)
    }

    /// Remove everything.
    pub fn clear(&self) -> Result<()> {
        self.buf.clear()
    }

    /// Replace the whole contents.
    pub fn replace_with(&self, text: &str) -> Result<()> {
        self.buf.set_text(text)
    }

    fn rewrite(&self, f: impl FnOnce(&str) -> String) -> Result<()> {
        self.check_mutable()?;
        let text = self.text();
        let updated = f(&text);
        if updated != text {
            self.buf.set_text(&updated)?;
        }
        Ok(())
    }

    /// Uppercase in place (root locale).
    pub fn upcase_in_place(&self) -> Result<()> {
        self.rewrite(|t| to_upper(t, &Locale::root()))
    }

    /// Lowercase in place (root locale).
    pub fn downcase_in_place(&self) -> Result<()> {
        self.rewrite(|t| to_lower(t, &Locale::root()))
    }

    /// Trim whitespace and NULs from both ends in place.
    pub fn strip_in_place(&self) -> Result<()> {
        self.rewrite(|t| t.trim_matches(is_strip).to_string())
    }

    /// Trim leading whitespace and NULs in place.
    pub fn lstrip_in_place(&self) -> Result<()> {
        self.rewrite(|t| t.trim_start_matches(is_strip).to_string())
    }

    /// Trim trailing whitespace and NULs in place.
    pub fn rstrip_in_place(&self) -> Result<()> {
        self.rewrite(|t| t.trim_end_matches(is_strip).to_string())
    }

    // ------------------------------------------------------------------
    // Derived copies
    // ------------------------------------------------------------------

    #[must_use]
    pub fn upcase(&self) -> Self {
        self.upcase_locale(&Locale::root())
    }

    #[must_use]
    pub fn downcase(&self) -> Self {
        self.downcase_locale(&Locale::root())
    }

    /// Uppercase with the rules of `locale` (Turkic dotted i).
    #[must_use]
    pub fn upcase_locale(&self, locale: &Locale) -> Self {
        Self::from(to_upper(&self.text(), locale))
    }

    /// Lowercase with the rules of `locale` (Turkic dotless i).
    #[must_use]
    pub fn downcase_locale(&self, locale: &Locale) -> Self {
        Self::from(to_lower(&self.text(), locale))
    }

    /// Case-folded copy for caseless comparison.
    #[must_use]
    pub fn foldcase(&self) -> Self {
        Self::from(fold(&self.text(), &Locale::root()))
    }

    #[must_use]
    pub fn strip(&self) -> Self {
        Self::from(self.text().trim_matches(is_strip))
    }

    #[must_use]
    pub fn lstrip(&self) -> Self {
        Self::from(self.text().trim_start_matches(is_strip))
    }

    #[must_use]
    pub fn rstrip(&self) -> Self {
        Self::from(self.text().trim_end_matches(is_strip))
    }

    /// Normalized copy.
    #[must_use]
    pub fn normalize(&self, form: NormalForm) -> Self {
        Self::from(UnicodeNormalizer.normalize(&self.text(), form))
    }

    /// Whether the text is already in `form`.
    #[must_use]
    pub fn is_normalized(&self, form: NormalForm) -> bool {
        UnicodeNormalizer.is_normalized(&self.text(), form)
    }

    /// The text repeated `n` times.
    #[must_use]
    pub fn repeat(&self, n: usize) -> Self {
        Self::from(self.text().repeat(n))
    }

    // ------------------------------------------------------------------
    // Segments
    // ------------------------------------------------------------------

    fn each_segment<F>(&self, granularity: Granularity, mut f: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<ControlFlow<()>>,
    {
        let _scan = self.buf.begin_scan();
        let text = self.text();
        for range in segments(&text, granularity) {
            if f(&text[range])?.is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Visit each grapheme cluster.
    pub fn each_char<F>(&self, f: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<ControlFlow<()>>,
    {
        self.each_segment(Granularity::Character, f)
    }

    /// Visit each word-boundary segment, including spaces and punctuation.
    pub fn each_word<F>(&self, f: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<ControlFlow<()>>,
    {
        self.each_segment(Granularity::Word, f)
    }

    /// Visit each sentence.
    pub fn each_sentence<F>(&self, f: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<ControlFlow<()>>,
    {
        self.each_segment(Granularity::Sentence, f)
    }

    /// Visit each piece between line-break opportunities.
    pub fn each_line_break<F>(&self, f: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<ControlFlow<()>>,
    {
        self.each_segment(Granularity::Line, f)
    }

    // ------------------------------------------------------------------
    // Comparison and search
    // ------------------------------------------------------------------

    /// Caseless codepoint order.
    #[must_use]
    pub fn casecmp(&self, other: &Self) -> Ordering {
        let root = Locale::root();
        fold(&self.text(), &root).cmp(&fold(&other.text(), &root))
    }

    /// Collation order under the process defaults.
    #[must_use]
    pub fn collate(&self, other: &Self) -> Ordering {
        let defaults = config();
        Self::strcoll(self, other, defaults.locale, defaults.strength)
    }

    /// Collation order of `a` and `b` under `locale` at `strength`.
    #[must_use]
    pub fn strcoll(a: &Self, b: &Self, locale: impl Into<Locale>, strength: Strength) -> Ordering {
        RootCollator::new(locale).compare(&a.text(), &b.text(), strength)
    }

    /// Sort key under the default locale.
    #[must_use]
    pub fn sort_key(&self, strength: Strength) -> Vec<u8> {
        RootCollator::new(default_locale()).sort_key(&self.text(), strength)
    }

    /// Collation search for `needle`; ranges are codepoint ranges.
    #[must_use]
    pub fn search(&self, needle: &str, options: &SearchOptions) -> Vec<Range<usize>> {
        SearchSession::new(&self.buf, options.clone()).find_all_in(needle, Space::Codepoint)
    }
}

fn is_strip(c: char) -> bool {
    c.is_whitespace() || c == '\0'
}

impl PartialEq for UString {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text()
    }
}

impl Eq for UString {}

impl PartialEq<str> for UString {
    fn eq(&self, other: &str) -> bool {
        self.text() == other
    }
}

impl PartialEq<&str> for UString {
    fn eq(&self, other: &&str) -> bool {
        self.text() == *other
    }
}

impl Hash for UString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text().hash(state);
    }
}

impl fmt::Debug for UString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UString").field(&self.text()).finish()
    }
}

impl fmt::Display for UString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<&str> for UString {
    fn from(text: &str) -> Self {
        Self {
            buf: TextBuffer::with_text(text),
        }
    }
}

impl From<String> for UString {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<&String> for UString {
    fn from(text: &String) -> Self {
        Self::from(text.as_str())
    }
}

impl Add<&UString> for &UString {
    type Output = UString;

    fn add(self, rhs: &UString) -> UString {
        UString::from(self.text() + &rhs.text())
    }
}

impl Add<&str> for UString {
    type Output = Self;

    fn add(self, rhs: &str) -> Self {
        Self::from(self.text() + rhs)
    }
}
