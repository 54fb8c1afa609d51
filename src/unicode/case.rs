//! Locale-aware case mapping.
//!
//! Full Unicode case mapping comes from the standard library; the only
//! tailoring applied is the Turkic dotted/dotless i distinction. Case
//! folding layers the folds that differ from lowercasing on top.

use crate::locale::Locale;

/// Uppercase `text` under `locale`.
#[must_use]
pub fn to_upper(text: &str, locale: &Locale) -> String {
    if !locale.is_turkic() {
        return text.to_uppercase();
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'i' => out.push('\u{0130}'),
            'ı' => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}

/// Lowercase `text` under `locale`.
#[must_use]
pub fn to_lower(text: &str, locale: &Locale) -> String {
    if !locale.is_turkic() {
        return text.to_lowercase();
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\u{0130}' => out.push('i'),
            // I + combining dot above is the decomposed dotted capital.
            'I' if chars.peek() == Some(&'\u{0307}') => {
                chars.next();
                out.push('i');
            }
            'I' => out.push('ı'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Case-fold `text` for caseless comparison.
///
/// This is full folding: `ß` becomes `ss`, final sigma becomes `σ` and the
/// Greek iota subscript forms expand. Under a Turkic locale `I` folds to
/// dotless `ı` and `İ` to plain `i`.
#[must_use]
pub fn fold(text: &str, locale: &Locale) -> String {
    let turkic = locale.is_turkic();
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'I' if turkic => out.push('ı'),
            '\u{0130}' if turkic => out.push('i'),
            _ => fold_char_into(c, &mut out),
        }
    }
    out
}

fn fold_char_into(c: char, out: &mut String) {
    if let Some(expansion) = full_fold(c) {
        out.push_str(expansion);
    } else if let Some(iota) = iota_subscript_base(c) {
        out.push(iota);
        out.push('\u{03B9}');
    } else if let Some(folded) = simple_fold(c) {
        out.push(folded);
    } else {
        out.extend(c.to_lowercase());
    }
}

/// Folds that expand to more than one character.
const fn full_fold(c: char) -> Option<&'static str> {
    Some(match c {
        '\u{00DF}' | '\u{1E9E}' => "ss",
        '\u{0149}' => "\u{02BC}n",
        '\u{01F0}' => "j\u{030C}",
        '\u{0390}' => "\u{03B9}\u{0308}\u{0301}",
        '\u{03B0}' => "\u{03C5}\u{0308}\u{0301}",
        '\u{0587}' => "\u{0565}\u{0582}",
        '\u{1E96}' => "h\u{0331}",
        '\u{1E97}' => "t\u{0308}",
        '\u{1E98}' => "w\u{030A}",
        '\u{1E99}' => "y\u{030A}",
        '\u{1E9A}' => "a\u{02BE}",
        '\u{1F50}' => "\u{03C5}\u{0313}",
        '\u{1F52}' => "\u{03C5}\u{0313}\u{0300}",
        '\u{1F54}' => "\u{03C5}\u{0313}\u{0301}",
        '\u{1F56}' => "\u{03C5}\u{0313}\u{0342}",
        '\u{1FB2}' => "\u{1F70}\u{03B9}",
        '\u{1FB4}' => "\u{03AC}\u{03B9}",
        '\u{1FB6}' => "\u{03B1}\u{0342}",
        '\u{1FB7}' => "\u{03B1}\u{0342}\u{03B9}",
        '\u{1FC2}' => "\u{1F74}\u{03B9}",
        '\u{1FC4}' => "\u{03AE}\u{03B9}",
        '\u{1FC6}' => "\u{03B7}\u{0342}",
        '\u{1FC7}' => "\u{03B7}\u{0342}\u{03B9}",
        '\u{1FD2}' => "\u{03B9}\u{0308}\u{0300}",
        '\u{1FD3}' => "\u{03B9}\u{0308}\u{0301}",
        '\u{1FD6}' => "\u{03B9}\u{0342}",
        '\u{1FD7}' => "\u{03B9}\u{0308}\u{0342}",
        '\u{1FE2}' => "\u{03C5}\u{0308}\u{0300}",
        '\u{1FE3}' => "\u{03C5}\u{0308}\u{0301}",
        '\u{1FE4}' => "\u{03C1}\u{0313}",
        '\u{1FE6}' => "\u{03C5}\u{0342}",
        '\u{1FE7}' => "\u{03C5}\u{0308}\u{0342}",
        '\u{1FF2}' => "\u{1F7C}\u{03B9}",
        '\u{1FF4}' => "\u{03CE}\u{03B9}",
        '\u{1FF6}' => "\u{03C9}\u{0342}",
        '\u{1FF7}' => "\u{03C9}\u{0342}\u{03B9}",
        '\u{FB00}' => "ff",
        '\u{FB01}' => "fi",
        '\u{FB02}' => "fl",
        '\u{FB03}' => "ffi",
        '\u{FB04}' => "ffl",
        '\u{FB05}' | '\u{FB06}' => "st",
        '\u{FB13}' => "\u{0574}\u{0576}",
        '\u{FB14}' => "\u{0574}\u{0565}",
        '\u{FB15}' => "\u{0574}\u{056B}",
        '\u{FB16}' => "\u{057E}\u{0576}",
        '\u{FB17}' => "\u{0574}\u{056D}",
        _ => return None,
    })
}

/// Base letter of a Greek vowel carrying an iota subscript or adscript.
fn iota_subscript_base(c: char) -> Option<char> {
    let base = match c {
        '\u{1F80}'..='\u{1FAF}' => {
            let row = match (u32::from(c) - 0x1F80) / 0x10 {
                0 => 0x1F00,
                1 => 0x1F20,
                _ => 0x1F60,
            };
            row + (u32::from(c) & 0x7)
        }
        '\u{1FB3}' | '\u{1FBC}' => 0x03B1,
        '\u{1FC3}' | '\u{1FCC}' => 0x03B7,
        '\u{1FF3}' | '\u{1FFC}' => 0x03C9,
        _ => return None,
    };
    char::from_u32(base)
}

/// Single-character folds that differ from lowercasing.
fn simple_fold(c: char) -> Option<char> {
    let folded = match c {
        '\u{00B5}' => '\u{03BC}',
        '\u{017F}' => 's',
        '\u{0345}' | '\u{1FBE}' => '\u{03B9}',
        '\u{03C2}' => '\u{03C3}',
        '\u{03D0}' => '\u{03B2}',
        '\u{03D1}' => '\u{03B8}',
        '\u{03D5}' => '\u{03C6}',
        '\u{03D6}' => '\u{03C0}',
        '\u{03F0}' => '\u{03BA}',
        '\u{03F1}' => '\u{03C1}',
        '\u{03F5}' => '\u{03B5}',
        '\u{1C80}' => '\u{0432}',
        '\u{1C81}' => '\u{0434}',
        '\u{1C82}' => '\u{043E}',
        '\u{1C83}' => '\u{0441}',
        '\u{1C84}' | '\u{1C85}' => '\u{0442}',
        '\u{1C86}' => '\u{044A}',
        '\u{1C87}' => '\u{0463}',
        '\u{1C88}' => '\u{A64B}',
        '\u{1E9B}' => '\u{1E61}',
        // Cherokee folds to the uppercase letters.
        '\u{13A0}'..='\u{13F5}' => c,
        '\u{13F8}'..='\u{13FD}' => return char::from_u32(u32::from(c) - 8),
        '\u{AB70}'..='\u{ABBF}' => return char::from_u32(u32::from(c) - 0xAB70 + 0x13A0),
        _ => return None,
    };
    Some(folded)
}

/// Lowercase a single character, honouring the Turkic tailoring.
pub(crate) fn lower_char_into(c: char, locale: &Locale, out: &mut String) {
    match c {
        '\u{0130}' if locale.is_turkic() => out.push('i'),
        'I' if locale.is_turkic() => out.push('ı'),
        _ => out.extend(c.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_cyrillic() {
        assert_eq!(to_upper("аБв", &Locale::root()), "АБВ");
        assert_eq!(to_lower("аБв", &Locale::root()), "абв");
    }

    #[test]
    fn test_upper_accented() {
        assert_eq!(
            to_upper("Iñtërnâtiônàlizætiøn îs cọmpłèx", &Locale::root()),
            "IÑTËRNÂTIÔNÀLIZÆTIØN ÎS CỌMPŁÈX"
        );
    }

    #[test]
    fn test_turkic_i() {
        let tr = Locale::new("tr");
        assert_eq!(to_upper("istanbul", &tr), "İSTANBUL");
        assert_eq!(to_lower("İSTANBUL", &tr), "istanbul");
        assert_eq!(to_lower("ISPARTA", &tr), "ısparta");
        assert_eq!(to_lower("I\u{0307}", &tr), "i");
    }

    #[test]
    fn test_fold_expands_sharp_s() {
        let root = Locale::root();
        assert_eq!(fold("Straße", &root), "strasse");
        assert_eq!(fold("STRASSE", &root), fold("straße", &root));
        assert_eq!(fold("\u{1E9E}", &root), "ss");
        assert_eq!(fold("\u{FB03}x", &root), "ffix");
        assert_eq!(fold("\u{00B5}", &root), "\u{03BC}");
    }

    #[test]
    fn test_fold_final_sigma() {
        let root = Locale::root();
        assert_eq!(fold("ΣΑΣ", &root), "σασ");
        assert_eq!(fold("σας", &root), "σασ");
        assert_eq!(to_lower("σας", &root), "σας");
    }

    #[test]
    fn test_fold_greek_iota_subscript() {
        let root = Locale::root();
        assert_eq!(fold("\u{1FB3}", &root), "\u{03B1}\u{03B9}");
        assert_eq!(fold("\u{1FBC}", &root), "\u{03B1}\u{03B9}");
        assert_eq!(fold("\u{1F88}", &root), "\u{1F00}\u{03B9}");
        assert_eq!(fold("\u{1FAF}", &root), "\u{1F67}\u{03B9}");
        assert_eq!(fold("\u{0390}", &root), "\u{03B9}\u{0308}\u{0301}");
    }

    #[test]
    fn test_fold_turkic() {
        let tr = Locale::new("tr");
        assert_eq!(fold("İI", &tr), "iı");
        assert_eq!(fold("İI", &Locale::root()), "i\u{0307}i");
        assert_eq!(fold("Straße", &tr), "strasse");
    }

    #[test]
    fn test_fold_cherokee_to_upper() {
        let root = Locale::root();
        assert_eq!(fold("\u{AB70}\u{13F8}", &root), "\u{13A0}\u{13F0}");
        assert_eq!(fold("\u{13A0}", &root), "\u{13A0}");
    }

    #[test]
    fn test_root_i_is_not_tailored() {
        assert_eq!(to_upper("i", &Locale::root()), "I");
        assert_eq!(to_lower("I", &Locale::root()), "i");
    }
}
