//! Conditions that gate [`ValuesMust`](super::ValuesMust).

use super::rule::Check;
use crate::{Field, LookupResult};

/// Test over the whole resolved value list of a field.
pub type ValuesPredicate = fn(&LookupResult) -> bool;

/// A condition over the unit being checked.
pub trait Predicate: Send + Sync {
    fn test(&self, check: &Check<'_>) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Check<'_>) -> bool + Send + Sync,
{
    fn test(&self, check: &Check<'_>) -> bool {
        self(check)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Always;

impl Predicate for Always {
    fn test(&self, _: &Check<'_>) -> bool {
        true
    }
}

/// `field` resolves to at least one value.
#[derive(Debug, Clone)]
pub struct Present(pub Field);

impl Predicate for Present {
    fn test(&self, check: &Check<'_>) -> bool {
        check.lookup(&self.0).found()
    }
}

/// Some resolved value of `field` is one of `values`.
#[derive(Debug, Clone)]
pub struct FieldEquals(pub Field, pub Vec<&'static str>);

impl Predicate for FieldEquals {
    fn test(&self, check: &Check<'_>) -> bool {
        check.lookup(&self.0).values().iter().any(|v| self.1.contains(&v.value.as_str()))
    }
}

/// Boolean `field` is set to a true value.
#[derive(Debug, Clone)]
pub struct Flag(pub Field);

impl Predicate for Flag {
    fn test(&self, check: &Check<'_>) -> bool {
        check.lookup(&self.0).truthy()
    }
}

pub struct And(pub Vec<Box<dyn Predicate>>);

impl Predicate for And {
    fn test(&self, check: &Check<'_>) -> bool {
        self.0.iter().all(|p| p.test(check))
    }
}

pub struct Not(pub Box<dyn Predicate>);

impl Predicate for Not {
    fn test(&self, check: &Check<'_>) -> bool {
        !self.0.test(check)
    }
}
