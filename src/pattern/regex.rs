//! Compiled regular expressions on the `regex-automata` meta engine.

use super::{Haystack, Matcher, PatternFlags, RawMatch};
use crate::error::{Error, Result};
use regex_automata::Input;
use regex_automata::meta::Regex;
use regex_automata::util::syntax;
use std::fmt;

/// A compiled pattern.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    flags: PatternFlags,
    regex: Regex,
}

impl Pattern {
    /// Compile `pattern` with default flags.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_flags(pattern, PatternFlags::empty())
    }

    /// Compile `pattern` with `flags`.
    pub fn with_flags(pattern: &str, flags: PatternFlags) -> Result<Self> {
        let escaped;
        let source = if flags.contains(PatternFlags::LITERAL) {
            escaped = escape(pattern);
            escaped.as_str()
        } else {
            pattern
        };

        let config = syntax::Config::new()
            .case_insensitive(flags.contains(PatternFlags::IGNORE_CASE))
            .multi_line(flags.contains(PatternFlags::MULTILINE))
            .dot_matches_new_line(flags.contains(PatternFlags::DOT_ALL));

        let regex = Regex::builder()
            .syntax(config)
            .build(source)
            .map_err(|e| {
                tracing::debug!(pattern, error = %e, "pattern failed to compile");
                Error::PatternSyntax(e.to_string())
            })?;

        Ok(Self {
            source: pattern.to_string(),
            flags,
            regex,
        })
    }

    /// Compile a pattern that matches `text` exactly.
    pub fn literal(text: &str) -> Result<Self> {
        Self::with_flags(text, PatternFlags::LITERAL)
    }

    /// Pattern text as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Compile flags.
    #[must_use]
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Whether the pattern matches anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl Matcher for Pattern {
    fn find(&self, hay: &Haystack, from: usize) -> Option<RawMatch> {
        if from > hay.len_units() {
            return None;
        }
        let text = hay.as_str();
        let input = Input::new(text).span(hay.unit_to_byte(from)..text.len());
        let mut caps = self.regex.create_captures();
        self.regex.search_captures(&input, &mut caps);
        if !caps.is_match() {
            return None;
        }
        let groups = (0..caps.group_len())
            .map(|i| {
                caps.get_group(i)
                    .map(|span| hay.byte_to_unit(span.start)..hay.byte_to_unit(span.end))
            })
            .collect();
        Some(RawMatch { groups })
    }

    fn group_count(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("flags", &self.flags)
            .finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Escape regex metacharacters in `text`.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
                | '#' | '&' | '-' | '~'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
