//! Codepoint-level Unicode services: clusters, case, normalization,
//! collation, segmentation and escape decoding.

mod case;
mod collate;
mod escape;
mod grapheme;
mod normalize;
mod segment;

pub use case::{fold, to_lower, to_upper};
pub use collate::{Collator, RootCollator, Strength};
pub use escape::unescape;
pub use grapheme::{
    GraphemeIterator, cluster_starts, grapheme_indices, graphemes, is_combining_mark,
    is_word_char,
};
pub use normalize::{NormalForm, Normalizer, UnicodeNormalizer, normalize_nfc};
pub use segment::{BreakType, Granularity, find_line_breaks, segments};
