use crate::{Location, UnitType};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A value as written in the file, with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitValue {
    pub key: String,
    /// Raw text; may still contain continuation markers (`\` + newline) and quotes.
    pub value: String,
    /// 1-based line number.
    pub line: usize,
    /// 0-based character column.
    pub column: usize,
}

impl UnitValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>, line: usize, column: usize) -> Self {
        Self { key: key.into(), value: value.into(), line, column }
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }
}

/// One `Key=Value` line of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitLine {
    pub key: String,
    /// Column of the key's first character.
    pub key_column: usize,
    pub value: UnitValue,
}

impl UnitLine {
    pub fn location(&self) -> Location {
        Location::new(self.value.line, self.key_column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitGroup {
    pub name: String,
    /// Line of the first `[name]` header.
    pub line: usize,
    pub lines: Vec<UnitLine>,
}

impl UnitGroup {
    /// All occurrences of `key`, in file order.
    pub fn values<'a, 'k>(&'a self, key: &'k str) -> impl DoubleEndedIterator<Item = &'a UnitValue> + 'k
    where
        'a: 'k,
    {
        self.lines.iter().filter(move |l| l.key == key).map(|l| &l.value)
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, 0)
    }
}

/// A parsed unit file. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFile {
    path: PathBuf,
    unit_type: Option<UnitType>,
    groups: Vec<UnitGroup>,
    index: HashMap<String, usize>,
}

impl UnitFile {
    pub fn builder(path: impl Into<PathBuf>) -> UnitFileBuilder {
        UnitFileBuilder::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the file, the name other units reference it by.
    pub fn file_name(&self) -> &str {
        self.path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
    }

    pub fn unit_type(&self) -> Option<UnitType> {
        self.unit_type
    }

    /// Groups in the order they first appeared.
    pub fn groups(&self) -> &[UnitGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&UnitGroup> {
        self.index.get(name).map(|&i| &self.groups[i])
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Whether `key` occurs at all in `group`.
    pub fn has_key(&self, group: &str, key: &str) -> bool {
        self.group(group).is_some_and(|g| g.values(key).next().is_some())
    }

    /// Whether the last occurrence of `key` in `group` has a non-blank value.
    pub fn has_value(&self, group: &str, key: &str) -> bool {
        self.group(group).and_then(|g| g.values(key).next_back()).is_some_and(|v| !v.value.trim().is_empty())
    }
}

/// Incremental construction of a [`UnitFile`].
///
/// Repeated group names reuse the existing group; lines are appended in call
/// order.
#[derive(Debug)]
pub struct UnitFileBuilder {
    file: UnitFile,
    current: Option<usize>,
}

impl UnitFileBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let unit_type = UnitType::from_path(&path);
        Self { file: UnitFile { path, unit_type, groups: Vec::new(), index: HashMap::new() }, current: None }
    }

    /// Make `name` the current group, creating it if needed.
    pub fn group(&mut self, name: &str, line: usize) -> &mut Self {
        let idx = match self.file.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.file.groups.push(UnitGroup { name: name.to_string(), line, lines: Vec::new() });
                let idx = self.file.groups.len() - 1;
                self.file.index.insert(name.to_string(), idx);
                idx
            }
        };
        self.current = Some(idx);
        self
    }

    pub fn has_current_group(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_group_name(&self) -> Option<&str> {
        self.current.map(|i| self.file.groups[i].name.as_str())
    }

    /// Append a line to the current group, or to a new `name`-less group at
    /// line 0 when no group was opened yet.
    pub fn line(&mut self, line: UnitLine) -> &mut Self {
        let idx = match self.current {
            Some(idx) => idx,
            None => {
                self.group("", 0);
                self.current.unwrap_or_default()
            }
        };
        self.file.groups[idx].lines.push(line);
        self
    }

    /// Convenience for programmatic construction: append `key=value` to
    /// `group`, numbering lines in insertion order.
    pub fn add(&mut self, group: &str, key: &str, value: &str) -> &mut Self {
        self.group(group, self.next_line());
        let line = self.next_line();
        self.line(UnitLine {
            key: key.to_string(),
            key_column: 0,
            value: UnitValue::new(key, value, line, key.chars().count() + 1),
        })
    }

    fn next_line(&self) -> usize {
        self.file.groups.iter().map(|g| g.lines.len()).sum::<usize>() + self.file.groups.len() + 1
    }

    pub fn build(self) -> UnitFile {
        self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_groups_merge_in_first_position() {
        let mut b = UnitFile::builder("web.container");
        b.add("Container", "Image", "a").add("Service", "Restart", "always").add("Container", "Image", "b");
        let unit = b.build();

        let names: Vec<&str> = unit.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Container", "Service"]);
        let values: Vec<&str> = unit.group("Container").unwrap().values("Image").map(|v| v.value.as_str()).collect();
        assert_eq!(values, vec!["a", "b"]);
        assert_eq!(unit.unit_type(), Some(UnitType::Container));
        assert_eq!(unit.file_name(), "web.container");
    }

    #[test]
    fn key_and_value_probes() {
        let mut b = UnitFile::builder("x.volume");
        b.add("Volume", "Label", "a=b").add("Volume", "User", " ");
        let unit = b.build();

        assert!(unit.has_key("Volume", "Label"));
        assert!(unit.has_value("Volume", "Label"));
        assert!(unit.has_key("Volume", "User"));
        assert!(!unit.has_value("Volume", "User"));
        assert!(!unit.has_key("Volume", "Driver"));
        assert!(!unit.has_key("Container", "Label"));
    }

    #[test]
    fn values_outlive_the_key() {
        let mut b = UnitFile::builder("x.container");
        b.add("Container", "Volume", "a").add("Container", "Volume", "b");
        let unit = b.build();

        let last = {
            let key = String::from("Volume");
            unit.group("Container").and_then(|g| g.values(&key).next_back())
        };
        assert_eq!(last.map(|v| v.value.as_str()), Some("b"));
    }
}
