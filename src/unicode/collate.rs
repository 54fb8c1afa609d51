//! Collation: locale-sensitive ordering and equivalence.
//!
//! [`Collator`] is the seam to a collation engine. [`RootCollator`] is a
//! compact multi-level collator that covers what search and comparison in
//! this crate need:
//!
//! - primary: base letters only (case folded, combining marks dropped,
//!   ligatures and a few stroked letters expanded to their base letters)
//! - secondary: primary plus accents
//! - tertiary: secondary plus case, lowercase sorting first
//! - identical: tertiary plus the full decomposed text
//!
//! All levels are computed on NFD text, so canonically equivalent inputs
//! always collate equal.

use crate::locale::Locale;
use crate::unicode::case::lower_char_into;
use crate::unicode::grapheme::is_combining_mark;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;

/// Comparison strength, from loosest to strictest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strength {
    /// Base letters only.
    Primary,
    /// Base letters and accents.
    Secondary,
    /// Base letters, accents and case.
    #[default]
    Tertiary,
    /// Every codepoint after canonical decomposition.
    Identical,
}

/// Collation engine seam.
pub trait Collator {
    /// Sort key for `text`: lexicographic comparison of keys reproduces
    /// [`compare`](Self::compare).
    fn sort_key(&self, text: &str, strength: Strength) -> Vec<u8>;

    /// Order `a` relative to `b`.
    fn compare(&self, a: &str, b: &str, strength: Strength) -> Ordering {
        self.sort_key(a, strength).cmp(&self.sort_key(b, strength))
    }

    /// Whether `a` and `b` are equivalent at `strength`.
    fn equivalent(&self, a: &str, b: &str, strength: Strength) -> bool {
        self.compare(a, b, strength) == Ordering::Equal
    }
}

impl<C: Collator + ?Sized> Collator for &C {
    fn sort_key(&self, text: &str, strength: Strength) -> Vec<u8> {
        (**self).sort_key(text, strength)
    }
}

const LEVEL_SEPARATOR: u8 = 0x00;
const CASE_LOWER: u8 = 0x01;
const CASE_UPPER: u8 = 0x02;

/// Root collation with optional Turkic tailoring.
#[derive(Clone, Debug, Default)]
pub struct RootCollator {
    locale: Locale,
}

impl RootCollator {
    /// Create a collator for `locale`.
    #[must_use]
    pub fn new(locale: impl Into<Locale>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    /// Locale this collator was opened for.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    fn tailor(&self, text: &str) -> String {
        if !self.locale.is_turkic() {
            return text.to_string();
        }
        // Dotted capital İ is a letter of its own in Turkic locales; keep it
        // from decomposing into I + dot above before folding.
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\u{0130}' | 'I' => lower_char_into(c, &self.locale, &mut out),
                _ => out.push(c),
            }
        }
        out
    }
}

impl Collator for RootCollator {
    fn sort_key(&self, text: &str, strength: Strength) -> Vec<u8> {
        let tailored = self.tailor(text);
        let mut primary = String::with_capacity(text.len());
        let mut secondary = String::with_capacity(text.len());
        let mut lowered = String::new();

        for c in tailored.nfd() {
            if is_combining_mark(c) {
                secondary.push(c);
                continue;
            }
            lowered.clear();
            lower_char_into(c, &self.locale, &mut lowered);
            for lc in lowered.chars() {
                push_primary(lc, &mut primary);
            }
            secondary.push_str(&lowered);
        }

        let mut key = primary.into_bytes();
        if strength >= Strength::Secondary {
            key.push(LEVEL_SEPARATOR);
            key.extend_from_slice(secondary.as_bytes());
        }
        if strength >= Strength::Tertiary {
            key.push(LEVEL_SEPARATOR);
            key.extend(text.nfd().filter(|c| !is_combining_mark(*c)).map(|c| {
                if c.is_uppercase() {
                    CASE_UPPER
                } else {
                    CASE_LOWER
                }
            }));
        }
        if strength == Strength::Identical {
            key.push(LEVEL_SEPARATOR);
            key.extend(text.nfd().collect::<String>().into_bytes());
        }
        key
    }
}

/// Append the primary weight letters for a lowercase character.
fn push_primary(c: char, out: &mut String) {
    match c {
        'æ' => out.push_str("ae"),
        'œ' => out.push_str("oe"),
        'ß' => out.push_str("ss"),
        'ø' => out.push('o'),
        'ł' => out.push('l'),
        'đ' => out.push('d'),
        _ if is_combining_mark(c) => {}
        _ => out.push(c),
    }
}
