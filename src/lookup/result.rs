use crate::words::SplitError;
use crate::{Location, UnitValue};
use once_cell::unsync::OnceCell;

/// A word-splitting failure met while resolving a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIssue {
    pub location: Location,
    pub error: SplitError,
}

/// Resolved values of one field in one unit file.
///
/// Scalar views ([`value`](Self::value), [`bool_value`](Self::bool_value),
/// [`int_value`](Self::int_value)) require exactly one value and panic
/// otherwise; a caller asking for a scalar of a multi-valued field has the
/// catalog wrong.
#[derive(Debug, Default)]
pub struct LookupResult {
    values: Vec<UnitValue>,
    issues: Vec<SplitIssue>,
    strings: OnceCell<Vec<String>>,
}

impl LookupResult {
    pub(crate) fn new(values: Vec<UnitValue>, issues: Vec<SplitIssue>) -> Self {
        Self { values, issues, strings: OnceCell::new() }
    }

    pub fn values(&self) -> &[UnitValue] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether anything was resolved.
    pub fn found(&self) -> bool {
        !self.values.is_empty()
    }

    /// Split failures; the values before a failure are still resolved.
    pub fn issues(&self) -> &[SplitIssue] {
        &self.issues
    }

    /// Value texts, computed once per result.
    pub fn strings(&self) -> &[String] {
        self.strings.get_or_init(|| self.values.iter().map(|v| v.value.clone()).collect())
    }

    #[track_caller]
    pub fn value(&self) -> &UnitValue {
        match self.values.as_slice() {
            [single] => single,
            other => panic!("scalar view needs exactly one value, found {}", other.len()),
        }
    }

    #[track_caller]
    pub fn bool_value(&self) -> bool {
        super::resolve::is_true(&self.value().value)
    }

    #[track_caller]
    pub fn int_value(&self) -> i64 {
        let value = self.value();
        match super::resolve::parse_int(&value.value) {
            Some(n) => n,
            None => panic!("integer view of non-integer value '{}'", value.value),
        }
    }

    /// Boolean view that treats an absent field as `false`.
    pub fn truthy(&self) -> bool {
        self.found() && self.bool_value()
    }
}
