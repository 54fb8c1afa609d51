//! `unitext` - Unicode text values for Rust
//!
//! A mutable string type addressed in three index spaces (UTF-16 code
//! units, codepoints and grapheme clusters), with regex scanning and
//! substitution, locale-aware case mapping, normalization, collation and
//! collation-based search.
//!
//! Editing is guarded: while a scan over a string is running, the string
//! can be read and scanned again but not changed, so callbacks never see
//! offsets shift under them.

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Index arithmetic stays within isize
#![allow(clippy::cast_sign_loss)] // Signed indices are checked before casting
#![allow(clippy::cast_possible_wrap)] // Lengths fit in isize
#![allow(clippy::module_name_repetitions)] // Allow text::TextBuffer etc
#![allow(clippy::missing_errors_doc)] // Error variants are documented on Error
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Options structs are passed by value
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod config;
pub mod convert;
pub mod error;
pub mod locale;
pub mod pattern;
pub mod search;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use config::{Config, config, default_locale, set_config, set_default_locale};
pub use convert::Converter;
pub use error::{Error, Result};
pub use locale::Locale;

// Re-export pattern types
pub use pattern::{
    Commit, Match, Needle, Pattern, PatternFlags, PatternSession, Replaced, Replacer, Template,
};

// Re-export search types
pub use search::{SearchFlags, SearchOptions, SearchSession};

// Re-export commonly used types
pub use text::{Access, MutationGuard, Rounding, ScanToken, Space, TextBuffer, UString};
pub use unicode::{Collator, Granularity, NormalForm, RootCollator, Strength};
