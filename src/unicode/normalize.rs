//! Unicode normalization.

use unicode_normalization::UnicodeNormalization;

/// Normalization form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NormalForm {
    /// Canonical decomposition followed by canonical composition.
    Nfc,
    /// Canonical decomposition.
    Nfd,
    /// Compatibility decomposition followed by canonical composition.
    Nfkc,
    /// Compatibility decomposition.
    Nfkd,
    /// "Fast C or D": any text whose canonical decomposition is already
    /// correctly ordered. NFC and NFD text both qualify.
    Fcd,
}

/// Normalization engine seam.
pub trait Normalizer {
    /// Normalize `text` to `form`.
    fn normalize(&self, text: &str, form: NormalForm) -> String;

    /// Check whether `text` is already in `form`.
    fn is_normalized(&self, text: &str, form: NormalForm) -> bool {
        self.normalize(text, form) == text
    }
}

/// Normalizer backed by the `unicode-normalization` tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeNormalizer;

impl Normalizer for UnicodeNormalizer {
    fn normalize(&self, text: &str, form: NormalForm) -> String {
        match form {
            NormalForm::Nfc => text.nfc().collect(),
            NormalForm::Nfd => text.nfd().collect(),
            NormalForm::Nfkc => text.nfkc().collect(),
            NormalForm::Nfkd => text.nfkd().collect(),
            NormalForm::Fcd => {
                if is_fcd(text) {
                    text.to_string()
                } else {
                    text.nfd().collect()
                }
            }
        }
    }

    fn is_normalized(&self, text: &str, form: NormalForm) -> bool {
        match form {
            NormalForm::Nfc => unicode_normalization::is_nfc(text),
            NormalForm::Nfd => unicode_normalization::is_nfd(text),
            NormalForm::Nfkc => unicode_normalization::is_nfkc(text),
            NormalForm::Nfkd => unicode_normalization::is_nfkd(text),
            NormalForm::Fcd => is_fcd(text),
        }
    }
}

fn is_fcd(text: &str) -> bool {
    unicode_normalization::is_nfc(text) || unicode_normalization::is_nfd(text)
}

/// Normalize `text` to NFC (canonical composition).
#[must_use]
pub fn normalize_nfc(text: &str) -> String {
    text.nfc().collect()
}
