//! Fuzz target for pattern compilation and scanning.
//!
//! Arbitrary pattern text must compile or fail with an error; compiled
//! patterns must scan, split and substitute without panicking.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unitext::{Pattern, PatternFlags, UString};

#[derive(Arbitrary, Debug)]
struct Input {
    pattern: String,
    flags: u8,
    text: String,
    limit: i8,
}

fuzz_target!(|input: Input| {
    let flags = PatternFlags::from_bits_truncate(input.flags);
    let Ok(pattern) = Pattern::with_flags(&input.pattern, flags) else {
        return;
    };
    let s = UString::from(input.text.as_str());

    let mut last_end = 0;
    for m in s.matches(&pattern) {
        let range = m.unit_range();
        assert!(range.start >= last_end);
        last_end = range.end.max(range.start);
    }
    let _ = s.split_limit(&pattern, isize::from(input.limit));
    let _ = s.gsub(&pattern, "[$1]");
    let _ = s.gsub_in_place(&pattern, "$0");
    assert_eq!(s.to_string(), input.text);
});
