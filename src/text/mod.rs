//! Text storage with three index spaces and guarded editing.
//!
//! Key types:
//!
//! - [`TextBuffer`]: rope-backed storage addressed in UTF-16 code units,
//!   with a version counter and a [`MutationGuard`]
//! - [`BoundaryCache`]: codepoint and grapheme boundary tables used to
//!   convert positions between [`Space`]s
//! - [`UString`]: the string value built on top of a buffer
//!
//! # Examples
//!
//! ```
//! use unitext::text::{Space, TextBuffer};
//!
//! let buffer = TextBuffer::with_text("e\u{0301}\u{1D7D9}");
//! assert_eq!(buffer.len(), 4);
//! assert_eq!(buffer.len_in(Space::Codepoint), 3);
//! assert_eq!(buffer.len_in(Space::Character), 2);
//! ```

mod boundary;
mod buffer;
mod guard;
mod index;
mod rope;
mod ustring;

pub use boundary::{BoundaryCache, Rounding};
pub use buffer::TextBuffer;
pub use guard::{MutationGuard, ScanToken};
pub use index::{Access, Space, resolve_index, resolve_range, resolve_span};
pub use rope::RopeWrapper;
pub use ustring::UString;
