#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every helper

use tracing::Level;
use unitext::{Pattern, PatternFlags, UString};

/// Route crate logs to the test harness output.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Shorthand constructor.
pub fn u(text: &str) -> UString {
    UString::from(text)
}

/// Compile a pattern, panicking on syntax errors.
pub fn re(source: &str) -> Pattern {
    Pattern::new(source).expect("pattern should compile")
}

/// Compile a pattern with flags.
pub fn re_with(source: &str, flags: PatternFlags) -> Pattern {
    Pattern::with_flags(source, flags).expect("pattern should compile")
}

/// Convert a list of strings for comparison with `Vec<UString>`.
pub fn us(items: &[&str]) -> Vec<UString> {
    items.iter().map(|s| UString::from(*s)).collect()
}
