use super::rule::{Check, Rule};
use crate::{Catalog, CatalogError, Context, ErrorCategory, Field, UnitFile, UnitType, ValidationError, lookup};
use std::collections::HashSet;

/// Rules attached to one field, in evaluation order.
pub struct FieldRules {
    pub field: Field,
    pub rules: Vec<Box<dyn Rule>>,
}

/// Validates the group that belongs to one unit type.
pub struct Validator {
    name: &'static str,
    unit_type: UnitType,
    known: HashSet<String>,
    fields: Vec<FieldRules>,
}

impl Validator {
    /// A validator for `unit_type` that knows every catalog field of its group
    /// and has no rules yet.
    pub fn new(name: &'static str, unit_type: UnitType, catalog: &Catalog) -> Self {
        let fields: Vec<FieldRules> =
            catalog.group_fields(unit_type.group()).map(|f| FieldRules { field: f.clone(), rules: Vec::new() }).collect();
        let known = fields.iter().map(|f| f.field.key.clone()).collect();
        Self { name, unit_type, known, fields }
    }

    /// Append `rules` to the rules of `key`.
    pub fn attach(&mut self, key: &str, rules: Vec<Box<dyn Rule>>) -> Result<&mut Self, CatalogError> {
        let group = self.unit_type.group();
        let entry = self.fields.iter_mut().find(|f| f.field.key == key).ok_or_else(|| CatalogError::UnknownField {
            group: group.to_string(),
            key: key.to_string(),
        })?;
        entry.rules.extend(rules);
        Ok(self)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn group(&self) -> &'static str {
        self.unit_type.group()
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// Run every rule against `unit`, collecting all findings ordered by
    /// position.
    pub fn validate(&self, context: &Context, unit: &UnitFile) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let group = self.group();

        if let Some(g) = unit.group(group) {
            for line in g.lines.iter().filter(|l| !self.known.contains(&l.key)) {
                errors.push(ValidationError::new(
                    self.name,
                    ErrorCategory::UnknownKey,
                    line.location(),
                    format!("unsupported key '{}' in group {group}", line.key),
                ));
            }
        }

        for entry in &self.fields {
            if entry.rules.is_empty() && !unit.has_key(group, &entry.field.key) {
                continue;
            }
            let resolved = lookup(unit, &entry.field);
            let check = Check::new(context, unit, &entry.field, self.name);

            for issue in resolved.issues() {
                let message = format!("invalid value for key {}: {}", entry.field.key, issue.error);
                errors.push(check.error(ErrorCategory::InvalidValue, issue.location, message));
            }
            for rule in &entry.rules {
                let found = rule.check(&check, &resolved);
                tracing::trace!(validator = self.name, field = %entry.field, findings = found.len(), "rule checked");
                errors.extend(found);
            }
        }

        errors.sort_by_key(|e| e.location);
        tracing::debug!(
            validator = self.name,
            path = %unit.path().display(),
            findings = errors.len(),
            "validated unit file"
        );
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::builtin::{ConflictsWith, Required};
    use crate::{Location, LookupMode, Options, parse};

    fn catalog() -> Catalog {
        Catalog::from_fields([
            Field::new("Container", "Image", LookupMode::Last, false),
            Field::new("Container", "Rootfs", LookupMode::Last, false),
            Field::new("Container", "Sysctl", LookupMode::AllStrv, true),
        ])
    }

    fn validator(catalog: &Catalog) -> Validator {
        let rootfs = catalog.require("Container", "Rootfs").unwrap();
        let mut v = Validator::new("container", UnitType::Container, catalog);
        v.attach("Image", rules![Required, ConflictsWith(vec![rootfs])]).unwrap();
        v
    }

    fn run(text: &str) -> Vec<ValidationError> {
        let catalog = catalog();
        let unit = parse("web.container", text).unwrap();
        validator(&catalog).validate(&Context::new(Options::default(), Vec::new()), &unit)
    }

    #[test]
    fn attach_rejects_unknown_keys() {
        let catalog = catalog();
        let mut v = Validator::new("container", UnitType::Container, &catalog);
        assert!(matches!(v.attach("Bogus", rules![Required]), Err(CatalogError::UnknownField { .. })));
        assert_eq!(v.fields().len(), 3);
    }

    #[test]
    fn unknown_keys_only_in_own_group() {
        let errors = run("[Unit]\nDescription=x\n[Container]\nImage=quay.io/a\nFoo=bar\n[Service]\nRestart=always\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, ErrorCategory::UnknownKey);
        assert_eq!(errors[0].location, Location::new(5, 0));
    }

    #[test]
    fn missing_group_reports_at_file_level() {
        let errors = run("[Service]\nRestart=always\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, ErrorCategory::RequiredKey);
        assert_eq!(errors[0].location, Location::new(0, 0));
    }

    #[test]
    fn all_rules_run_and_findings_are_sorted() {
        let errors = run("[Container]\nSysctl=\"open\nRootfs=/r\nImage=quay.io/a\nBad=1\n");
        let got: Vec<(ErrorCategory, usize)> = errors.iter().map(|e| (e.category, e.location.line)).collect();
        assert_eq!(
            got,
            vec![(ErrorCategory::InvalidValue, 2), (ErrorCategory::KeyConflict, 4), (ErrorCategory::UnknownKey, 5)]
        );
        assert!(errors.iter().all(|e| e.validator == "container"));
    }
}
