//! Locale identifiers.
//!
//! A [`Locale`] is a language code plus an optional region, parsed from the
//! usual spellings (`"en"`, `"en_US"`, `"en-US"`, `"ru_RU.UTF-8"`). The
//! empty locale is the root locale, which applies no tailoring.

use std::fmt;
use std::str::FromStr;

/// Language and optional region.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// The root locale (no language-specific tailoring).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a locale identifier. Unrecognised input yields the root locale.
    #[must_use]
    pub fn new(id: &str) -> Self {
        // Drop encoding and modifier suffixes: "ru_RU.UTF-8@euro".
        let id = id.split(['.', '@']).next().unwrap_or_default().trim();
        if id.is_empty() || id.eq_ignore_ascii_case("c") || id.eq_ignore_ascii_case("posix") {
            return Self::root();
        }

        let mut parts = id.split(['_', '-']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        if !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Self::root();
        }
        let region = parts
            .next()
            .filter(|r| !r.is_empty())
            .map(str::to_ascii_uppercase);

        Self { language, region }
    }

    /// Language subtag, empty for the root locale.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Region subtag if present.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Whether this is the root locale.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.language.is_empty()
    }

    /// Turkish and Azerbaijani distinguish dotted and dotless i.
    #[must_use]
    pub fn is_turkic(&self) -> bool {
        matches!(self.language.as_str(), "tr" | "az")
    }
}

impl FromStr for Locale {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Locale {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{region}", self.language),
            None => f.write_str(&self.language),
        }
    }
}
