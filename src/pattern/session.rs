//! Driving a matcher across a buffer.
//!
//! A [`PatternSession`] moves through `Idle -> Scanning -> Committing ->
//! Idle`, or `Scanning -> Failed` when a callback returns an error. While
//! scanning it holds the buffer's scan token, so callbacks cannot write to
//! the buffer being scanned. Substitutions are assembled off to the side and
//! applied as a single write at the end, or not at all.

use super::{Haystack, Match, Matcher, Replacer};
use crate::error::{Error, Result};
use crate::text::{ScanToken, TextBuffer};
use std::num::NonZeroUsize;
use std::ops::ControlFlow;
use std::rc::Rc;

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No scan in progress.
    #[default]
    Idle,
    /// Holding the buffer and producing matches.
    Scanning,
    /// Applying the assembled result.
    Committing,
    /// A callback or the commit failed; nothing was written.
    Failed,
}

/// What to do with a substitution result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commit {
    /// Write the result back into the scanned buffer.
    InPlace,
    /// Leave the buffer alone and only return the result.
    Detached,
}

/// Result of a substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replaced {
    /// The full text after substitution.
    pub text: String,
    /// Number of matches replaced.
    pub count: usize,
}

struct Scan<'a> {
    token: ScanToken<'a>,
    hay: Rc<Haystack>,
    /// Next search offset in code units, `None` once exhausted.
    from: Option<usize>,
    found: usize,
}

/// A matcher bound to one buffer.
pub struct PatternSession<'a> {
    buffer: &'a TextBuffer,
    matcher: &'a dyn Matcher,
    limit: Option<NonZeroUsize>,
    state: SessionState,
    scan: Option<Scan<'a>>,
}

impl<'a> PatternSession<'a> {
    /// Create an idle session.
    pub fn new(buffer: &'a TextBuffer, matcher: &'a dyn Matcher) -> Self {
        Self {
            buffer,
            matcher,
            limit: None,
            state: SessionState::Idle,
            scan: None,
        }
    }

    /// Stop after `limit` matches.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.limit = limit;
        self
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Start scanning from the beginning of the buffer. Any scan already in
    /// progress is abandoned.
    pub fn begin(&mut self) {
        self.scan = None;
        let token = self.buffer.begin_scan();
        let hay = Rc::new(Haystack::from_rope(self.buffer.snapshot()));
        tracing::debug!(
            version = token.version(),
            units = hay.len_units(),
            groups = self.matcher.group_count(),
            "pattern scan started"
        );
        self.scan = Some(Scan {
            token,
            hay,
            from: Some(0),
            found: 0,
        });
        self.state = SessionState::Scanning;
    }

    /// Next match, beginning a scan if idle.
    ///
    /// After an empty match the search resumes one whole codepoint later,
    /// so every scan terminates.
    pub fn find_next(&mut self) -> Option<Match> {
        if self.state == SessionState::Idle {
            self.begin();
        }
        if self.state != SessionState::Scanning {
            return None;
        }
        let scan = self.scan.as_mut()?;
        if self.limit.is_some_and(|limit| scan.found >= limit.get()) {
            return None;
        }
        let from = scan.from?;
        let Some(raw) = self.matcher.find(&scan.hay, from) else {
            scan.from = None;
            return None;
        };
        let range = raw.range();
        scan.from = if range.is_empty() {
            scan.hay.next_boundary(range.end)
        } else {
            Some(range.end)
        };
        scan.found += 1;
        tracing::trace!(start = range.start, end = range.end, "match");
        Some(Match::new(Rc::clone(&scan.hay), raw))
    }

    /// End the scan and release the buffer.
    pub fn finish(&mut self) {
        if let Some(scan) = self.scan.take() {
            tracing::debug!(matches = scan.found, "pattern scan finished");
        }
        self.state = SessionState::Idle;
    }

    fn fail(&mut self, err: Error) -> Error {
        self.scan = None;
        self.state = SessionState::Failed;
        tracing::debug!(error = %err, "pattern scan failed");
        err
    }

    fn haystack(&self) -> Option<Rc<Haystack>> {
        self.scan.as_ref().map(|scan| Rc::clone(&scan.hay))
    }

    /// Every match, in order.
    pub fn matches(&mut self) -> Vec<Match> {
        self.begin();
        let mut out = Vec::new();
        while let Some(m) = self.find_next() {
            out.push(m);
        }
        self.finish();
        out
    }

    /// Call `f` for each match until it breaks or the matches run out.
    /// Returns the number of matches visited.
    pub fn scan_all<F>(&mut self, mut f: F) -> Result<usize>
    where
        F: FnMut(&Match) -> Result<ControlFlow<()>>,
    {
        self.begin();
        let mut count = 0;
        while let Some(m) = self.find_next() {
            count += 1;
            match f(&m) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => break,
                Err(e) => return Err(self.fail(e)),
            }
        }
        self.finish();
        Ok(count)
    }

    /// Split the buffer around matches.
    ///
    /// Text of participating capture groups is emitted between segments.
    /// Empty matches at the start of a segment or at the end of the text
    /// do not split. With `limit > 0` at most `limit` segments are produced,
    /// the last holding the rest of the text; with `limit == 0` trailing
    /// empty segments are dropped; with `limit < 0` they are kept.
    pub fn split(&mut self, limit: isize) -> Vec<String> {
        self.begin();
        let Some(hay) = self.haystack() else {
            return Vec::new();
        };
        let len = hay.len_units();
        if len == 0 {
            self.finish();
            return Vec::new();
        }

        let max_fields = usize::try_from(limit).ok().filter(|&l| l > 0);
        let mut out = Vec::new();
        let mut fields = 0;
        let mut seg_start = 0;
        while max_fields.is_none_or(|max| fields + 1 < max) {
            let Some(m) = self.find_next() else {
                break;
            };
            let range = m.unit_range();
            if range.is_empty() && (range.start == len || range.start == seg_start) {
                continue;
            }
            out.push(hay.slice_units(seg_start..range.start).to_string());
            fields += 1;
            out.extend((1..m.group_len()).filter_map(|g| m.get(g)).map(str::to_string));
            seg_start = range.end;
        }
        out.push(hay.slice_units(seg_start..len).to_string());

        if limit == 0 {
            while out.last().is_some_and(String::is_empty) {
                out.pop();
            }
        }
        self.finish();
        out
    }

    /// Replace the first match.
    pub fn replace_first(&mut self, replacer: impl Replacer, commit: Commit) -> Result<Replaced> {
        self.replace(replacer, commit, true)
    }

    /// Replace every match.
    pub fn replace_all(&mut self, replacer: impl Replacer, commit: Commit) -> Result<Replaced> {
        self.replace(replacer, commit, false)
    }

    fn replace(
        &mut self,
        mut replacer: impl Replacer,
        commit: Commit,
        first_only: bool,
    ) -> Result<Replaced> {
        if commit == Commit::InPlace {
            if let Err(e) = self.buffer.guard().assert_mutable() {
                return Err(self.fail(e));
            }
        }
        self.begin();
        let Some(hay) = self.haystack() else {
            return Err(self.fail(Error::ConcurrentMutation));
        };

        let mut text = String::with_capacity(hay.as_str().len());
        let mut last = 0;
        let mut count = 0;
        while let Some(m) = self.find_next() {
            let range = m.unit_range();
            match replacer.replace(&m) {
                Ok(ControlFlow::Continue(replacement)) => {
                    text.push_str(hay.slice_units(last..range.start));
                    text.push_str(&replacement);
                    last = range.end;
                    count += 1;
                }
                Ok(ControlFlow::Break(())) => break,
                Err(e) => return Err(self.fail(e)),
            }
            if first_only {
                break;
            }
        }
        text.push_str(hay.slice_units(last..hay.len_units()));

        self.state = SessionState::Committing;
        if commit == Commit::InPlace && count > 0 {
            let written = match &self.scan {
                Some(scan) => {
                    let whole = 0..hay.len_units();
                    self.buffer.commit(&scan.token, whole, &text)
                }
                None => Err(Error::ConcurrentMutation),
            };
            if let Err(e) = written {
                return Err(self.fail(e));
            }
        }
        self.finish();
        Ok(Replaced { text, count })
    }
}

impl Drop for PatternSession<'_> {
    fn drop(&mut self) {
        if self.state == SessionState::Scanning {
            self.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Pattern, Template};

    fn split(text: &str, pattern: &str, limit: isize) -> Vec<String> {
        let buf = TextBuffer::with_text(text);
        let p = Pattern::new(pattern).unwrap();
        PatternSession::new(&buf, &p).split(limit)
    }

    #[test]
    fn test_state_transitions() {
        let buf = TextBuffer::with_text("abc");
        let p = Pattern::new("b").unwrap();
        let mut s = PatternSession::new(&buf, &p);
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.find_next().is_some());
        assert_eq!(s.state(), SessionState::Scanning);
        assert!(buf.guard().is_scanning());
        assert!(s.find_next().is_none());
        s.finish();
        assert_eq!(s.state(), SessionState::Idle);
        assert!(!buf.guard().is_scanning());
    }

    #[test]
    fn test_empty_matches_advance() {
        let buf = TextBuffer::with_text("a\u{1D7D9}b");
        let p = Pattern::new("x*").unwrap();
        let starts: Vec<_> = PatternSession::new(&buf, &p)
            .matches()
            .iter()
            .map(|m| m.unit_range().start)
            .collect();
        assert_eq!(starts, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_limit() {
        let buf = TextBuffer::with_text("aaaa");
        let p = Pattern::new("a").unwrap();
        let mut s = PatternSession::new(&buf, &p).with_limit(NonZeroUsize::new(2));
        assert_eq!(s.matches().len(), 2);
    }

    #[test]
    fn test_scan_all_break() {
        let buf = TextBuffer::with_text("a1b2c3");
        let p = Pattern::new(r"\d").unwrap();
        let mut seen = Vec::new();
        let count = PatternSession::new(&buf, &p)
            .scan_all(|m| {
                seen.push(m.as_str().to_string());
                Ok(if seen.len() == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                })
            })
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(seen, vec!["1", "2"]);
        assert!(!buf.guard().is_scanning());
    }

    #[test]
    fn test_split_limits() {
        assert_eq!(split("a,b,c,,", ",", -1), vec!["a", "b", "c", "", ""]);
        assert_eq!(split("a,b,c,,", ",", 0), vec!["a", "b", "c"]);
        assert_eq!(split("a|b|c", r"\|", 1), vec!["a|b|c"]);
        assert_eq!(split("a|b|c", r"\|", 2), vec!["a", "b|c"]);
        assert_eq!(split("a|b|c", r"\|", 3), vec!["a", "b", "c"]);
        assert_eq!(split("a||b|c|", r"\|", -1), vec!["a", "", "b", "c", ""]);
    }

    #[test]
    fn test_split_shapes() {
        assert_eq!(
            split("split test,west:best/east", "[,:/]", 0),
            vec!["split test", "west", "best", "east"]
        );
        assert_eq!(split("a   b\t c", r"\s+", 0), vec!["a", "b", "c"]);
        assert_eq!(split("aXXbXXcXX", "X.", 0), vec!["a", "b", "c"]);
        assert_eq!(split("abc", "", 0), vec!["a", "b", "c"]);
        assert!(split("", ",", -1).is_empty());
    }

    #[test]
    fn test_split_includes_captures() {
        assert_eq!(split("a1b2c", r"(\d)", 0), vec!["a", "1", "b", "2", "c"]);
        assert_eq!(split("a-b", r"(x)?-", 0), vec!["a", "b"]);
    }

    #[test]
    fn test_replace_detached() {
        let buf = TextBuffer::with_text("123456");
        let p = Pattern::new("(.)(.)").unwrap();
        let out = PatternSession::new(&buf, &p)
            .replace_all(Template::parse("$2$1"), Commit::Detached)
            .unwrap();
        assert_eq!(out.text, "214365");
        assert_eq!(out.count, 3);
        assert_eq!(buf.text(), "123456");
        assert_eq!(buf.version(), 0);
    }

    #[test]
    fn test_replace_in_place_bumps_version_once() {
        let buf = TextBuffer::with_text("hello");
        let p = Pattern::new("[aeiou]").unwrap();
        let out = PatternSession::new(&buf, &p)
            .replace_all(Template::parse("*"), Commit::InPlace)
            .unwrap();
        assert_eq!(out.count, 2);
        assert_eq!(buf.text(), "h*ll*");
        assert_eq!(buf.version(), 1);
    }

    #[test]
    fn test_replace_first() {
        let buf = TextBuffer::with_text("1234561234");
        let p = Pattern::new("123").unwrap();
        let out = PatternSession::new(&buf, &p)
            .replace_first(Template::parse(""), Commit::InPlace)
            .unwrap();
        assert_eq!(out.count, 1);
        assert_eq!(buf.text(), "4561234");
    }

    #[test]
    fn test_failed_callback_leaves_buffer() {
        let buf = TextBuffer::with_text(" 123456789Aa ");
        let p = Pattern::new(r"\d").unwrap();
        let mut s = PatternSession::new(&buf, &p);
        let err = s
            .replace_all(
                |m: &Match| -> Result<ControlFlow<(), String>> {
                    buf.append("x")?;
                    Ok(ControlFlow::Continue(m.as_str().to_string()))
                },
                Commit::InPlace,
            )
            .unwrap_err();
        assert_eq!(err, Error::ConcurrentMutation);
        assert_eq!(s.state(), SessionState::Failed);
        assert_eq!(buf.text(), " 123456789Aa ");
        assert!(!buf.guard().is_scanning());
    }

    #[test]
    fn test_nested_in_place_rejected() {
        let buf = TextBuffer::with_text("abc");
        let p = Pattern::new("b").unwrap();
        let _outer = buf.begin_scan();
        let err = PatternSession::new(&buf, &p)
            .replace_all(Template::parse("x"), Commit::InPlace)
            .unwrap_err();
        assert_eq!(err, Error::ConcurrentMutation);
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_break_keeps_earlier_replacements() {
        let buf = TextBuffer::with_text("aaaa");
        let p = Pattern::new("a").unwrap();
        let mut n = 0;
        let out = PatternSession::new(&buf, &p)
            .replace_all(
                |_: &Match| -> Result<ControlFlow<(), String>> {
                    n += 1;
                    Ok(if n > 2 {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue("b".to_string())
                    })
                },
                Commit::Detached,
            )
            .unwrap();
        assert_eq!(out.text, "bbaa");
        assert_eq!(out.count, 2);
    }
}
