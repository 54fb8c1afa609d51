//! Fuzz target for backslash escape decoding.
//!
//! Tests that unescaping arbitrary strings never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use unitext::UString;

fuzz_target!(|data: &str| {
    let _ = UString::from(data).unescape();

    // Text without backslashes decodes to itself.
    if !data.contains('\\') {
        let decoded = UString::from(data).unescape().expect("no escapes to fail on");
        assert_eq!(decoded.to_string(), data);
    }
});
