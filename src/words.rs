//! Escape decoding and shell-like word splitting.
//!
//! This module reproduces systemd's `extract_first_word()` /
//! `cunescape_one()` pair, which is how the init system turns one value
//! string into a list of words (for `ExecStart=`, environment assignments,
//! argument lists, ...).
//!
//! ```text
//! "/bin/x \"a b\" c"
//!        │
//!        ├─ extract_first_word ──▶ "/bin/x"   (rest: "\"a b\" c")
//!        ├─ extract_first_word ──▶ "a b"      (rest: "c")
//!        └─ extract_first_word ──▶ "c"        (rest: none)
//! ```
//!
//! ## Parts
//!
//! - `flags.rs`: [`SplitFlags`], the orthogonal switches that control quoting,
//!   escaping and separator handling, plus the presets used by value lookup.
//! - `escape.rs`: [`unescape_one`], decoding of a single C-style escape.
//! - `split.rs`: [`extract_first_word`] and [`split_all`].
//!
//! Offsets reported by this module are *character* offsets into the input, so
//! callers can map words back onto source columns.

#[path = "words/escape.rs"]
mod escape;
#[path = "words/flags.rs"]
mod flags;
#[path = "words/split.rs"]
mod split;

pub use escape::{EscapeError, Unescaped, unescape_one};
pub use flags::{SplitFlags, WHITESPACE};
pub use split::{Extracted, SplitError, Word, extract_first_word, split_all};
pub(crate) use split::Splitter;
