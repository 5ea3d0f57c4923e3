//! Rule engine.
//!
//! A [`Validator`] owns the catalog fields of one unit type's group, each with
//! an ordered list of [`Rule`]s. Validation resolves every field once and hands
//! the result to each of its rules:
//!
//! ```text
//! UnitFile ─┬─ unknown keys in the group ────────────────────────────┐
//!           └─ for each field with rules (or present):               │
//!                lookup() ──▶ LookupResult ─┬─ split issues ─────────┤──▶ Vec<ValidationError>
//!                                           └─ rule 1 … rule n ──────┘    (sorted by location)
//! ```
//!
//! All rules run; nothing short-circuits. Rules that depend on other fields
//! resolve them through [`Check::lookup`]. Rules that look at other files go
//! through the shared [`Context`](crate::Context).
//!
//! - `rule.rs`: [`Rule`] and the per-call [`Check`].
//! - `builtin.rs`: the rule library.
//! - `predicate.rs`: gates for [`ValuesMust`].
//! - `validator.rs`: [`Validator`] and [`FieldRules`].

#[path = "validate/builtin.rs"]
mod builtin;
#[path = "validate/predicate.rs"]
mod predicate;
#[path = "validate/rule.rs"]
mod rule;
#[path = "validate/validator.rs"]
mod validator;

pub use builtin::{
    AllowedValues, CanReference, ConflictsWith, DependsOn, Deprecated, HasSuffix, ImageNotAmbiguous, Required,
    RequiredIfNotPresent, ValidBoolean, ValidInteger, ValuesMust,
};
pub use predicate::{Always, And, FieldEquals, Flag, Not, Predicate, Present, ValuesPredicate};
pub use rule::{Check, Rule};
pub use validator::{FieldRules, Validator};
