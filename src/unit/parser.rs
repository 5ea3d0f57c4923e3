//! Unit-file parser.
//!
//! The parser walks physical lines with a two-state machine:
//!
//! ```text
//!            [Group]                 [Group]
//! NoGroup ─────────────▶ InGroup ◀──────────┐
//!    │                     │  Key=Value      │
//!    │ Key=Value           └─────────────────┘
//!    ▼
//! fatal: "does not start with a group"
//! ```
//!
//! Each physical line is trimmed before classification. A key/value line that
//! ends in `\` absorbs the following physical lines (joined with `\n`, so the
//! continuation marker survives in the raw value) until the accumulated line no
//! longer ends in `\`. Group headers are never continued.
//!
//! Errors are collected for the whole file; a missing group aborts parsing
//! immediately. Any error means no [`UnitFile`] is produced.

use super::model::{UnitFile, UnitLine, UnitValue};
use super::syntax::{group_header_end, indent, invalid_group_char, invalid_key_char, is_comment, key_value_split};
use crate::Location;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("key-value pair does not start with a group")]
    MissingGroup,
    #[error("invalid group name '{0}'")]
    InvalidGroupName(String),
    #[error("invalid key name '{0}'")]
    InvalidKey(String),
    #[error("key '{0}' has an empty value")]
    EmptyValue(String),
    #[error("line is not a key-value pair or group")]
    UnrecognizedLine,
}

/// A syntax error at a position in the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    /// Group being parsed when the error occurred (or the invalid group name).
    pub group: Option<String>,
    /// Key of the offending line, if it had one.
    pub key: Option<String>,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }
}

/// Parse `text` as the contents of the unit file at `path`.
///
/// The unit type is derived from the extension of `path`.
pub fn parse(path: impl AsRef<Path>, text: &str) -> Result<UnitFile, Vec<ParseError>> {
    let path = path.as_ref();
    let physical: Vec<&str> = text.lines().collect();
    let mut builder = UnitFile::builder(path);
    let mut errors = Vec::new();

    let mut next = 0;
    while next < physical.len() {
        let number = next + 1;
        let raw = physical[next];
        next += 1;

        let column = indent(raw);
        let line = raw.trim();

        if is_comment(line) {
            continue;
        }

        if let Some(end) = group_header_end(line) {
            let name = &line[1..end];
            tracing::trace!(line = number, group = name, "group header");
            if let Some(bad) = invalid_group_char(name) {
                errors.push(ParseError {
                    line: number,
                    column: column + 1 + bad,
                    group: Some(name.to_string()),
                    key: None,
                    kind: ParseErrorKind::InvalidGroupName(name.to_string()),
                });
            }
            // Entered even when invalid so its lines are not reported as group-less.
            builder.group(name, number);
            continue;
        }

        if let Some(eq) = key_value_split(line) {
            let mut logical = line.to_string();
            while logical.ends_with('\\') && next < physical.len() {
                logical.push('\n');
                logical.push_str(physical[next].trim_end());
                next += 1;
            }

            if !builder.has_current_group() {
                errors.push(ParseError {
                    line: number,
                    column,
                    group: None,
                    key: Some(line[..eq].trim_end().to_string()),
                    kind: ParseErrorKind::MissingGroup,
                });
                tracing::debug!(path = %path.display(), line = number, "key-value pair before any group");
                return Err(errors);
            }

            match key_value(&logical, eq, number, column) {
                Ok(unit_line) => {
                    tracing::trace!(line = number, key = %unit_line.key, "key-value pair");
                    builder.line(unit_line);
                }
                Err((kind, at)) => {
                    errors.push(ParseError {
                        line: number,
                        column: at,
                        group: builder.current_group_name().map(str::to_string),
                        key: Some(logical[..eq].trim_end().to_string()),
                        kind,
                    });
                }
            }
            continue;
        }

        errors.push(ParseError {
            line: number,
            column,
            group: builder.current_group_name().map(str::to_string),
            key: None,
            kind: ParseErrorKind::UnrecognizedLine,
        });
    }

    if errors.is_empty() {
        let unit = builder.build();
        tracing::debug!(path = %path.display(), groups = unit.groups().len(), "parsed unit file");
        Ok(unit)
    } else {
        tracing::debug!(path = %path.display(), errors = errors.len(), "unit file has syntax errors");
        Err(errors)
    }
}

/// Split a logical `key=value` line whose first `=` is at byte `eq`.
fn key_value(logical: &str, eq: usize, number: usize, indent: usize) -> Result<UnitLine, (ParseErrorKind, usize)> {
    let key = logical[..eq].trim_end();
    if let Some(bad) = invalid_key_char(key) {
        return Err((ParseErrorKind::InvalidKey(key.to_string()), indent + bad));
    }

    let after = &logical[eq + 1..];
    let value = after.trim_start();
    let value_column = indent + logical[..=eq].chars().count() + (after.chars().count() - value.chars().count());
    if value.is_empty() {
        return Err((ParseErrorKind::EmptyValue(key.to_string()), value_column));
    }

    Ok(UnitLine {
        key: key.to_string(),
        key_column: indent,
        value: UnitValue::new(key, value, number, value_column),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnitType;

    fn errors(text: &str) -> Vec<ParseError> {
        parse("test.container", text).unwrap_err()
    }

    #[test]
    fn parses_groups_and_lines_in_order() {
        let text = "# comment\n; other\n\n[Container]\nImage=quay.io/x/y\nVolume=a:/a\n[Install]\nWantedBy=default.target\n[Container]\nVolume=b:/b\n";
        let unit = parse("web.container", text).unwrap();

        assert_eq!(unit.unit_type(), Some(UnitType::Container));
        let names: Vec<&str> = unit.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Container", "Install"]);

        let container = unit.group("Container").unwrap();
        assert_eq!(container.line, 4);
        let volumes: Vec<(&str, usize)> = container.values("Volume").map(|v| (v.value.as_str(), v.line)).collect();
        assert_eq!(volumes, vec![("a:/a", 6), ("b:/b", 10)]);
    }

    #[test]
    fn value_positions() {
        let unit = parse("x.container", "[Container]\n  Exec =  /bin/x \"a b\" c  \n").unwrap();
        let line = &unit.group("Container").unwrap().lines[0];
        assert_eq!(line.key, "Exec");
        assert_eq!(line.key_column, 2);
        assert_eq!(line.value.value, "/bin/x \"a b\" c");
        assert_eq!(line.value.line, 2);
        assert_eq!(line.value.column, 10);
    }

    #[test]
    fn continuation_lines_are_joined() {
        let text = "[Container]\nPodmanArgs=--foo \\\n  --bar \\\n--baz\nImage=x\n";
        let unit = parse("x.container", text).unwrap();
        let group = unit.group("Container").unwrap();
        assert_eq!(group.lines[0].value.value, "--foo \\\n  --bar \\\n--baz");
        assert_eq!(group.lines[1].value.line, 5);
    }

    #[test]
    fn group_headers_are_not_continued() {
        let unit = parse("x.container", "[Container]\nImage=a\\\n[Install]\n").unwrap();
        assert_eq!(unit.group("Container").unwrap().lines[0].value.value, "a\\\n[Install]");
        assert!(!unit.has_group("Install"));
    }

    #[test]
    fn missing_group_is_fatal() {
        let errs = errors("# hi\nKey=Value\nOther=1\n[Container]\n");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ParseErrorKind::MissingGroup);
        assert_eq!((errs[0].line, errs[0].column), (2, 0));
        assert_eq!(errs[0].key.as_deref(), Some("Key"));
    }

    #[test]
    fn invalid_group_name() {
        let errs = errors("[]\n[a[b]\n");
        assert_eq!(errs.len(), 2);
        assert_eq!(errs[0].kind, ParseErrorKind::InvalidGroupName(String::new()));
        assert_eq!(errs[0].column, 1);
        assert_eq!(errs[1].kind, ParseErrorKind::InvalidGroupName("a[b".into()));
        assert_eq!((errs[1].line, errs[1].column), (2, 2));
    }

    #[test]
    fn empty_value() {
        let errs = errors("[Container]\nImage=\nPull=   \n");
        assert_eq!(errs.len(), 2);
        assert_eq!(errs[0].kind, ParseErrorKind::EmptyValue("Image".into()));
        assert_eq!((errs[0].line, errs[0].column), (2, 6));
        assert_eq!(errs[0].group.as_deref(), Some("Container"));
        assert_eq!(errs[1].kind, ParseErrorKind::EmptyValue("Pull".into()));
    }

    #[test]
    fn unrecognized_lines() {
        let errs = errors("[Container]\nImage=x\njust words\n=value\n");
        assert_eq!(errs.len(), 2);
        assert!(errs.iter().all(|e| e.kind == ParseErrorKind::UnrecognizedLine));
        assert_eq!(errs[0].line, 3);
        assert_eq!(errs[1].line, 4);
    }

    #[test]
    fn error_display() {
        let errs = errors("Key=Value\n");
        assert_eq!(errs[0].to_string(), "1:0: key-value pair does not start with a group");
    }
}
