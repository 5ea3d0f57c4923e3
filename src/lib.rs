use serde::Serialize;
use std::fmt;
use std::path::Path;

#[macro_use]
mod macros;
mod api;
mod catalog;
mod lookup;
mod rules;
mod unit;
mod validate;
pub mod words;

pub use api::{Context, FileReport, Linter, Options, Report, Source, Summary};
pub use catalog::{Catalog, CatalogError, Field, LookupMode};
pub use lookup::{LookupResult, SplitIssue, lookup};
pub use unit::{ParseError, ParseErrorKind, UnitFile, UnitFileBuilder, UnitGroup, UnitLine, UnitValue, parse};
pub use validate::{
    AllowedValues, Always, And, CanReference, Check, ConflictsWith, DependsOn, Deprecated, FieldEquals, FieldRules, Flag,
    HasSuffix, ImageNotAmbiguous, Not, Predicate, Present, Required, RequiredIfNotPresent, Rule, ValidBoolean,
    ValidInteger, Validator, ValuesMust, ValuesPredicate,
};

// --- Unit types ---------------------------------------------------------------

/// The kind of Quadlet unit a file describes, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Container,
    Volume,
    Kube,
    Network,
    Image,
    Build,
    Pod,
}

impl UnitType {
    pub const ALL: [UnitType; 7] = [
        UnitType::Container,
        UnitType::Volume,
        UnitType::Kube,
        UnitType::Network,
        UnitType::Image,
        UnitType::Build,
        UnitType::Pod,
    ];

    /// File extension including the leading dot, e.g. `".container"`.
    pub fn extension(self) -> &'static str {
        match self {
            UnitType::Container => ".container",
            UnitType::Volume => ".volume",
            UnitType::Kube => ".kube",
            UnitType::Network => ".network",
            UnitType::Image => ".image",
            UnitType::Build => ".build",
            UnitType::Pod => ".pod",
        }
    }

    /// Name of the group that carries this unit type's settings.
    pub fn group(self) -> &'static str {
        match self {
            UnitType::Container => "Container",
            UnitType::Volume => "Volume",
            UnitType::Kube => "Kube",
            UnitType::Network => "Network",
            UnitType::Image => "Image",
            UnitType::Build => "Build",
            UnitType::Pod => "Pod",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        UnitType::ALL.into_iter().find(|t| &t.extension()[1..] == ext)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|e| e.to_str()).and_then(Self::from_extension)
    }

    /// Unit type named by a reference such as `db.volume`.
    pub fn of_reference(name: &str) -> Option<Self> {
        UnitType::ALL.into_iter().find(|t| name.ends_with(t.extension()))
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension()[1..])
    }
}

// --- Findings -----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Category of a semantic finding. Severity is fixed per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    UnknownKey,
    RequiredKey,
    KeyConflict,
    InvalidValue,
    DeprecatedKey,
    UnsatisfiedDependency,
    InvalidReference,
    AmbiguousImageName,
}

impl ErrorCategory {
    pub fn severity(self) -> Severity {
        match self {
            ErrorCategory::AmbiguousImageName => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorCategory::UnknownKey => "unknown-key",
            ErrorCategory::RequiredKey => "required-key",
            ErrorCategory::KeyConflict => "key-conflict",
            ErrorCategory::InvalidValue => "invalid-value",
            ErrorCategory::DeprecatedKey => "deprecated-key",
            ErrorCategory::UnsatisfiedDependency => "unsatisfied-dependency",
            ErrorCategory::InvalidReference => "invalid-reference",
            ErrorCategory::AmbiguousImageName => "ambiguous-image-name",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position in a unit file: 1-based line, 0-based character column.
///
/// Line 0 refers to the file as a whole (e.g. a missing group).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A semantic finding produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub category: ErrorCategory,
    pub severity: Severity,
    /// Name of the validator that produced the finding.
    pub validator: &'static str,
    pub location: Location,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        validator: &'static str,
        category: ErrorCategory,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self { category, severity: category.severity(), validator, location, message: message.into() }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}[{}] {}", self.location, self.severity, self.category, self.message)
    }
}
