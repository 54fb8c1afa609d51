//! Replacement templates and the [`Replacer`] trait.

use super::Match;
use crate::error::Result;
use std::ops::ControlFlow;

const MAX_GROUP_DIGITS: usize = 3;

/// Produces the replacement text for each match.
///
/// Returning `ControlFlow::Break` stops the scan after the matches seen so
/// far; it is not an error. Returning `Err` aborts the whole operation.
pub trait Replacer {
    fn replace(&mut self, m: &Match) -> Result<ControlFlow<(), String>>;
}

impl<F> Replacer for F
where
    F: FnMut(&Match) -> Result<ControlFlow<(), String>>,
{
    fn replace(&mut self, m: &Match) -> Result<ControlFlow<(), String>> {
        self(m)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Part {
    Literal(String),
    Group(usize),
}

/// A parsed replacement string.
///
/// `$n` (up to three digits) inserts group `n`; a group that does not exist
/// or did not participate inserts nothing. A `$` not followed by a digit is
/// literal. A backslash makes the next character literal, and a trailing
/// backslash is dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Template {
    parts: Vec<Part>,
}

impl Template {
    /// Parse a replacement string.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut parts = Vec::new();
        let mut lit = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if let Some(next) = chars.next() {
                        lit.push(next);
                    }
                }
                '$' if chars.peek().is_some_and(char::is_ascii_digit) => {
                    let mut group = 0usize;
                    let mut digits = 0;
                    while digits < MAX_GROUP_DIGITS {
                        let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) else {
                            break;
                        };
                        group = group * 10 + d as usize;
                        digits += 1;
                        chars.next();
                    }
                    if !lit.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut lit)));
                    }
                    parts.push(Part::Group(group));
                }
                _ => lit.push(c),
            }
        }
        if !lit.is_empty() {
            parts.push(Part::Literal(lit));
        }
        Self { parts }
    }

    /// Whether the template contains no group references.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.parts.iter().all(|p| matches!(p, Part::Literal(_)))
    }

    /// Expansion for `m`.
    #[must_use]
    pub fn render(&self, m: &Match) -> String {
        let mut out = String::new();
        self.expand(m, &mut out);
        out
    }

    /// Append the expansion for `m` to `out`.
    pub fn expand(&self, m: &Match, out: &mut String) {
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Group(i) => out.push_str(m.get(*i).unwrap_or_default()),
            }
        }
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl Replacer for Template {
    fn replace(&mut self, m: &Match) -> Result<ControlFlow<(), String>> {
        Ok(ControlFlow::Continue(self.render(m)))
    }
}

impl Replacer for &Template {
    fn replace(&mut self, m: &Match) -> Result<ControlFlow<(), String>> {
        Ok(ControlFlow::Continue(self.render(m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Haystack, Matcher, Pattern};
    use std::rc::Rc;

    fn expand(template: &str, pattern: &str, text: &str) -> String {
        let hay = Rc::new(Haystack::new(text));
        let raw = Pattern::new(pattern).unwrap().find(&hay, 0).unwrap();
        let m = Match::new(hay, raw);
        let mut out = String::new();
        Template::parse(template).expand(&m, &mut out);
        out
    }

    #[test]
    fn test_group_references() {
        assert_eq!(expand("$2$1", "(.)(.)", "12"), "21");
        assert_eq!(expand("b.$1", r".*\.([^.]+)$", "a.gif"), "b.gif");
        assert_eq!(expand("<$0>", "e", "hello"), "<e>");
    }

    #[test]
    fn test_dollar_without_digit_is_literal() {
        assert_eq!(expand("$e", "s", "test"), "$e");
        assert_eq!(expand("cost: $", "x", "x"), "cost: $");
    }

    #[test]
    fn test_missing_and_unset_groups_are_empty() {
        assert_eq!(expand("[$5]", "(a)", "a"), "[]");
        assert_eq!(expand("[$1|$2]", "(a)|(b)", "b"), "[|b]");
    }

    #[test]
    fn test_three_digit_limit() {
        // $1234 is group 123 followed by a literal 4
        assert_eq!(expand("$1234", "(a)", "a"), "4");
    }

    #[test]
    fn test_backslash_escapes() {
        assert_eq!(expand(r"\$1", "(a)", "a"), "$1");
        assert_eq!(expand(r"a\\b", "x", "x"), r"a\b");
        assert_eq!(expand("tail\\", "x", "x"), "tail");
    }

    #[test]
    fn test_is_literal() {
        assert!(Template::parse("plain $ text").is_literal());
        assert!(!Template::parse("$1").is_literal());
    }
}
