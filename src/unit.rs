//! Unit files: model and parser.
//!
//! ```text
//! text ── parse() ──▶ UnitFile
//!                       ├─ UnitGroup "Container"   (first occurrence fixes position)
//!                       │    ├─ UnitLine Image=...
//!                       │    └─ UnitLine Volume=...
//!                       └─ UnitGroup "Install"
//! ```
//!
//! - `model.rs`: the immutable [`UnitFile`] and its [`UnitFileBuilder`].
//! - `syntax.rs`: line classification and name validity rules of the dialect.
//! - `parser.rs`: the line state machine and [`ParseError`].

#[path = "unit/model.rs"]
mod model;
#[path = "unit/parser.rs"]
mod parser;
#[path = "unit/syntax.rs"]
mod syntax;

pub use model::{UnitFile, UnitFileBuilder, UnitGroup, UnitLine, UnitValue};
pub use parser::{ParseError, ParseErrorKind, parse};
