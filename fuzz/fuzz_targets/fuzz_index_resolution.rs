//! Fuzz target for signed index and range handling.
//!
//! Slicing and editing with arbitrary indices must return `None` or an
//! error, never panic, and must never leave half a surrogate pair behind.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unitext::text::Space;
use unitext::UString;

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    start: isize,
    end: isize,
    count: isize,
    replacement: String,
}

fuzz_target!(|input: Input| {
    let s = UString::from(input.text.as_str());

    let _ = s.get(input.start..input.end);
    let _ = s.get(input.start..=input.end);
    let _ = s.get_span(input.start, input.count);
    let _ = s.get_at(input.start);
    let _ = s.get_in(Space::CodeUnit, input.start..input.end);
    let _ = s.get_in(Space::Character, input.start..input.end);
    let _ = s.conv_unit_range(input.start..input.end);
    let _ = s.conv_point_range(input.start..input.end);

    let _ = s.set_range(input.start..input.end, &input.replacement);
    let _ = s.insert(input.count, &input.replacement);
    let _ = s.remove_span(input.start, input.count);

    // The text must still be valid and consistent across spaces.
    let text = s.to_string();
    assert_eq!(s.len_units(), text.encode_utf16().count());
    assert_eq!(s.len(), text.chars().count());
});
