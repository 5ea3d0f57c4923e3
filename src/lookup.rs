//! Value resolution.
//!
//! [`lookup`] reads one [`Field`](crate::Field) out of a
//! [`UnitFile`](crate::UnitFile) according to its lookup mode:
//!
//! ```text
//!              ┌ LastRaw ─────────────────────────────────────┐
//! last value ──┼ Last ── splice ─────────────────────────────┤
//!              └ Base ── splice, trim, unquote ─┬ Boolean ───┤
//!                                               └ Int ───────┤
//!              ┌ AllRaw ── empty value resets ─────────────────┤──▶ LookupResult
//! all values ──┼ All ── splice ────────────────────────────────┤
//!              └ AllStrv / AllArgs / AllKeyVal ── split words ─┘
//! ```
//!
//! Every resolved value keeps the line and column of its first source
//! character, including words split out of continued lines.

#[path = "lookup/resolve.rs"]
mod resolve;
#[path = "lookup/result.rs"]
mod result;
#[path = "lookup/splice.rs"]
mod splice;

pub use resolve::lookup;
pub use result::{LookupResult, SplitIssue};

