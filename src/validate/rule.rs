use crate::{Context, ErrorCategory, Field, Location, LookupResult, UnitFile, ValidationError, lookup};

/// Everything a rule sees while checking one field of one unit file.
#[derive(Debug, Clone, Copy)]
pub struct Check<'a> {
    pub context: &'a Context,
    pub unit: &'a UnitFile,
    pub field: &'a Field,
    /// Name of the validator running the rule.
    pub validator: &'static str,
}

impl<'a> Check<'a> {
    pub fn new(context: &'a Context, unit: &'a UnitFile, field: &'a Field, validator: &'static str) -> Self {
        Self { context, unit, field, validator }
    }

    /// Resolve another field of the same unit.
    pub fn lookup(&self, field: &Field) -> LookupResult {
        lookup(self.unit, field)
    }

    /// Where a finding about the field as a whole is reported: the key of its
    /// last occurrence, else the group header, else the file (line 0).
    pub fn anchor(&self) -> Location {
        let Some(group) = self.unit.group(&self.field.group) else {
            return Location::default();
        };
        match group.lines.iter().rev().find(|l| l.key == self.field.key) {
            Some(line) => line.location(),
            None => group.location(),
        }
    }

    pub fn error(&self, category: ErrorCategory, location: Location, message: impl Into<String>) -> ValidationError {
        ValidationError::new(self.validator, category, location, message)
    }
}

/// A validation rule attached to a field.
///
/// Rules receive the field already resolved and return every finding; an
/// empty vector means the field passed.
pub trait Rule: Send + Sync {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError>;
}

impl<F> Rule for F
where
    F: Fn(&Check<'_>, &LookupResult) -> Vec<ValidationError> + Send + Sync,
{
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        self(check, resolved)
    }
}
