use crate::{Catalog, CatalogError, ParseError, Severity, UnitFile, ValidationError, Validator, parse};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

static DEFAULT_LINTER: Lazy<Linter> = Lazy::new(|| match Linter::new(Catalog::builtin()) {
    Ok(linter) => linter,
    Err(e) => panic!("built-in rule tables do not match the built-in catalog: {e}"),
});

/// Options that affect validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Check that units referenced by other units (`db.volume`, `app.network`,
    /// ...) are part of the same run.
    pub check_references: bool,
}

/// Read-only state shared by every validation in one run: the options and all
/// unit files that parsed cleanly.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub options: Options,
    units: Vec<UnitFile>,
    names: HashSet<String>,
}

impl Context {
    pub fn new(options: Options, units: Vec<UnitFile>) -> Self {
        let names = units.iter().map(|u| u.file_name().to_string()).collect();
        Self { options, units, names }
    }

    pub fn units(&self) -> &[UnitFile] {
        &self.units
    }

    /// Whether a unit file named `name` (base name, e.g. `db.volume`) is part
    /// of the run.
    pub fn has_unit(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// One input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub text: String,
}

impl Source {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self { path: path.into(), text: text.into() }
    }
}

/// Outcome for a single file. A file with parse errors has no findings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    pub parse_errors: Vec<ParseError>,
    pub findings: Vec<ValidationError>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.parse_errors.is_empty() && self.findings.is_empty()
    }
}

/// Counts across a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Parse errors plus error-level findings.
    pub errors: usize,
    pub warnings: usize,
    pub has_blocking_errors: bool,
}

/// Result of [`Linter::lint`], ordered by path.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub files: BTreeMap<PathBuf, FileReport>,
    /// Wall time of both phases.
    pub elapsed: Duration,
}

impl Report {
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&FileReport> {
        self.files.get(path.as_ref())
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for file in self.files.values() {
            summary.errors += file.parse_errors.len();
            for finding in &file.findings {
                match finding.severity {
                    Severity::Error => summary.errors += 1,
                    Severity::Warning => summary.warnings += 1,
                }
            }
        }
        summary.has_blocking_errors = summary.errors > 0;
        summary
    }
}

/// The built-in validators bound to one catalog.
pub struct Linter {
    validators: Vec<Validator>,
}

impl Linter {
    pub fn new(catalog: &Catalog) -> Result<Self, CatalogError> {
        Ok(Self { validators: crate::rules::builtin(catalog)? })
    }

    /// Linter over the built-in catalog, built once per process.
    pub fn builtin() -> &'static Linter {
        &DEFAULT_LINTER
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Parse and validate `sources`.
    ///
    /// Phase one parses every file in parallel. Phase two builds one
    /// [`Context`] from the files that parsed and validates those in parallel.
    ///
    /// # Example
    /// ```
    /// use quadlint::{Linter, Options, Source};
    ///
    /// let sources = [Source::new("web.container", "[Container]\nImage=fedora\n")];
    /// let report = Linter::builtin().lint(&sources, &Options::default());
    ///
    /// let summary = report.summary();
    /// assert_eq!(summary.warnings, 1);
    /// assert!(!summary.has_blocking_errors);
    /// ```
    pub fn lint(&self, sources: &[Source], options: &Options) -> Report {
        let start = Instant::now();

        let parsed: Vec<(PathBuf, Result<UnitFile, Vec<ParseError>>)> =
            sources.par_iter().map(|s| (s.path.clone(), parse(&s.path, &s.text))).collect();

        let mut files = BTreeMap::new();
        let mut units = Vec::new();
        for (path, outcome) in parsed {
            match outcome {
                Ok(unit) => units.push(unit),
                Err(parse_errors) => {
                    files.insert(path, FileReport { parse_errors, findings: Vec::new() });
                }
            }
        }
        tracing::debug!(parsed = units.len(), failed = files.len(), "parse phase done");

        let context = Context::new(options.clone(), units);
        let validated: Vec<(PathBuf, Vec<ValidationError>)> = context
            .units()
            .par_iter()
            .map(|unit| (unit.path().to_path_buf(), self.validate(&context, unit)))
            .collect();
        for (path, findings) in validated {
            files.insert(path, FileReport { parse_errors: Vec::new(), findings });
        }

        let elapsed = start.elapsed();
        tracing::debug!(files = files.len(), ?elapsed, "lint run done");
        Report { files, elapsed }
    }

    /// Validate one parsed unit. Units of unrecognized type have no findings.
    pub fn validate(&self, context: &Context, unit: &UnitFile) -> Vec<ValidationError> {
        match unit.unit_type().and_then(|t| self.validators.iter().find(|v| v.unit_type() == t)) {
            Some(validator) => validator.validate(context, unit),
            None => {
                tracing::debug!(path = %unit.path().display(), "no validator for unit type");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorCategory, ParseErrorKind};

    #[test]
    fn two_phase_run() {
        let sources = vec![
            Source::new("web.container", "[Container]\nImage=quay.io/a/b\nVolume=db.volume:/data\n"),
            Source::new("db.volume", "[Volume]\nDriver=local\n"),
            Source::new("broken.volume", "Driver=local\n"),
        ];
        let report = Linter::builtin().lint(&sources, &Options { check_references: true });

        assert_eq!(report.files.len(), 3);
        assert!(report.file("web.container").unwrap().is_clean());
        assert!(report.file("db.volume").unwrap().is_clean());
        let broken = report.file("broken.volume").unwrap();
        assert_eq!(broken.parse_errors[0].kind, ParseErrorKind::MissingGroup);

        let summary = report.summary();
        assert_eq!(summary, Summary { errors: 1, warnings: 0, has_blocking_errors: true });
    }

    #[test]
    fn files_that_fail_to_parse_are_not_reference_targets() {
        let sources = vec![
            Source::new("web.container", "[Container]\nImage=quay.io/a/b\nNetwork=app.network\n"),
            Source::new("app.network", "[Network]\nnot a line\n"),
        ];
        let report = Linter::builtin().lint(&sources, &Options { check_references: true });
        let findings = &report.file("web.container").unwrap().findings;
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, ErrorCategory::InvalidReference);
    }

    #[test]
    fn unknown_unit_types_are_parsed_but_not_validated() {
        let sources = vec![Source::new("web.service", "[Service]\nBogus=1\n")];
        let report = Linter::builtin().lint(&sources, &Options::default());
        assert!(report.file("web.service").unwrap().is_clean());
    }

    #[test]
    fn context_names_are_base_names() {
        let unit = parse("/etc/containers/systemd/db.volume", "[Volume]\n").unwrap();
        let context = Context::new(Options::default(), vec![unit]);
        assert!(context.has_unit("db.volume"));
        assert!(!context.has_unit("/etc/containers/systemd/db.volume"));
    }
}
