//! Built-in rules.
//!
//! | Rule                   | Category               | Fires when                                   |
//! |------------------------|------------------------|----------------------------------------------|
//! | `Required`             | required-key           | field absent                                 |
//! | `RequiredIfNotPresent` | required-key           | field and the alternative both absent        |
//! | `ConflictsWith`        | key-conflict           | field and another listed field both present  |
//! | `AllowedValues`        | invalid-value          | a value outside the set                      |
//! | `HasSuffix`            | invalid-value          | a value without the suffix                   |
//! | `DependsOn`            | unsatisfied-dependency | field present, dependency absent             |
//! | `Deprecated`           | deprecated-key         | field present                                |
//! | `CanReference`         | invalid-reference      | referenced unit file not in the run          |
//! | `ValuesMust`           | invalid-value          | gate holds and the value test fails          |
//! | `ValidBoolean`         | invalid-value          | not a boolean spelling                       |
//! | `ValidInteger`         | invalid-value          | written but not an integer                   |
//! | `ImageNotAmbiguous`    | ambiguous-image-name   | short image name                             |

use super::predicate::{Predicate, ValuesPredicate};
use super::rule::{Check, Rule};
use crate::{ErrorCategory, Field, LookupResult, UnitType, ValidationError};

const BOOLEAN_WORDS: [&str; 12] = ["1", "yes", "y", "true", "t", "on", "0", "no", "n", "false", "f", "off"];

/// The field must be set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Rule for Required {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        if resolved.found() {
            return Vec::new();
        }
        vec![check.error(ErrorCategory::RequiredKey, check.anchor(), format!("key {} is required", check.field.key))]
    }
}

/// The field must be set unless `0` is.
#[derive(Debug, Clone)]
pub struct RequiredIfNotPresent(pub Field);

impl Rule for RequiredIfNotPresent {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        if resolved.found() || check.lookup(&self.0).found() {
            return Vec::new();
        }
        let message = format!("one of keys {} or {} is required", check.field.key, self.0.key);
        vec![check.error(ErrorCategory::RequiredKey, check.anchor(), message)]
    }
}

/// The field may not be combined with any of the listed fields.
#[derive(Debug, Clone)]
pub struct ConflictsWith(pub Vec<Field>);

impl Rule for ConflictsWith {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        if !resolved.found() {
            return Vec::new();
        }
        self.0
            .iter()
            .filter(|other| check.lookup(other).found())
            .map(|other| {
                let message = format!("keys {} and {} are mutually exclusive", check.field.key, other.key);
                check.error(ErrorCategory::KeyConflict, check.anchor(), message)
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct AllowedValues(pub Vec<&'static str>);

impl Rule for AllowedValues {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        resolved
            .values()
            .iter()
            .filter(|v| !self.0.contains(&v.value.as_str()))
            .map(|v| {
                let message = format!(
                    "invalid value '{}' for key {}, allowed values: {}",
                    v.value,
                    check.field.key,
                    self.0.join(", ")
                );
                check.error(ErrorCategory::InvalidValue, v.location(), message)
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct HasSuffix(pub &'static str);

impl Rule for HasSuffix {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        resolved
            .values()
            .iter()
            .filter(|v| !v.value.ends_with(self.0))
            .map(|v| {
                let message = format!("value '{}' of key {} must end with {}", v.value, check.field.key, self.0);
                check.error(ErrorCategory::InvalidValue, v.location(), message)
            })
            .collect()
    }
}

/// Setting the field requires `0` to be set too.
#[derive(Debug, Clone)]
pub struct DependsOn(pub Field);

impl Rule for DependsOn {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        if !resolved.found() || check.lookup(&self.0).found() {
            return Vec::new();
        }
        let message = format!("key {} requires key {} to be set", check.field.key, self.0.key);
        vec![check.error(ErrorCategory::UnsatisfiedDependency, check.anchor(), message)]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Deprecated;

impl Rule for Deprecated {
    fn check(&self, check: &Check<'_>, _: &LookupResult) -> Vec<ValidationError> {
        if !check.unit.has_key(&check.field.group, &check.field.key) {
            return Vec::new();
        }
        vec![check.error(ErrorCategory::DeprecatedKey, check.anchor(), format!("key {} is deprecated", check.field.key))]
    }
}

/// Values naming a unit file of one of these types must name a file of the
/// current run. The reference is the part of the value before the first `:`.
///
/// Inactive unless [`Options::check_references`](crate::Options) is set.
#[derive(Debug, Clone)]
pub struct CanReference(pub Vec<UnitType>);

impl Rule for CanReference {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        if !check.context.options.check_references {
            return Vec::new();
        }
        resolved
            .values()
            .iter()
            .filter_map(|v| {
                let target = v.value.split(':').next().unwrap_or_default();
                let unit_type = self.0.iter().find(|t| target.ends_with(t.extension()))?;
                if check.context.has_unit(target) {
                    return None;
                }
                let message = format!("requested {unit_type} unit {target} was not found");
                Some(check.error(ErrorCategory::InvalidReference, v.location(), message))
            })
            .collect()
    }
}

/// Structural check over all resolved values, gated by a predicate.
pub struct ValuesMust {
    pub test: ValuesPredicate,
    pub when: Box<dyn Predicate>,
    pub message: String,
}

impl ValuesMust {
    pub fn new(test: ValuesPredicate, when: impl Predicate + 'static, message: impl Into<String>) -> Self {
        Self { test, when: Box::new(when), message: message.into() }
    }
}

impl Rule for ValuesMust {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        if !self.when.test(check) || (self.test)(resolved) {
            return Vec::new();
        }
        let at = resolved.values().first().map(|v| v.location()).unwrap_or_else(|| check.anchor());
        vec![check.error(ErrorCategory::InvalidValue, at, self.message.clone())]
    }
}

/// Value must be one of the boolean spellings systemd accepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidBoolean;

impl Rule for ValidBoolean {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        resolved
            .values()
            .iter()
            .filter(|v| !BOOLEAN_WORDS.iter().any(|w| w.eq_ignore_ascii_case(&v.value)))
            .map(|v| {
                let message = format!("invalid boolean '{}' for key {}", v.value, check.field.key);
                check.error(ErrorCategory::InvalidValue, v.location(), message)
            })
            .collect()
    }
}

/// An integer field that is written but did not resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidInteger;

impl Rule for ValidInteger {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        if resolved.found() {
            return Vec::new();
        }
        let Some(raw) = check.unit.group(&check.field.group).and_then(|g| g.values(&check.field.key).next_back())
        else {
            return Vec::new();
        };
        let message = format!("invalid integer '{}' for key {}", raw.value.trim(), check.field.key);
        vec![check.error(ErrorCategory::InvalidValue, raw.location(), message)]
    }
}

/// Warns about image names that the container engine resolves through its
/// search registries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageNotAmbiguous;

impl Rule for ImageNotAmbiguous {
    fn check(&self, check: &Check<'_>, resolved: &LookupResult) -> Vec<ValidationError> {
        resolved
            .values()
            .iter()
            .filter(|v| is_ambiguous_image(&v.value))
            .map(|v| {
                let message = format!("image name '{}' is not fully qualified", v.value);
                check.error(ErrorCategory::AmbiguousImageName, v.location(), message)
            })
            .collect()
    }
}

pub(crate) fn is_ambiguous_image(name: &str) -> bool {
    if name.ends_with(UnitType::Image.extension()) || name.ends_with(UnitType::Build.extension()) {
        return false;
    }
    if name.starts_with("sha256:") || regex!(r"^[0-9a-f]{64}$").is_match(name) {
        return false;
    }
    match name.split_once('/') {
        Some((domain, _)) => !(domain.contains('.') || domain.contains(':') || domain == "localhost"),
        None => true,
    }
}
