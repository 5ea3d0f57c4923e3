//! Line classification and name rules of the unit-file dialect.
//!
//! These are deliberately literal: a line is a group header only if it starts
//! with `[`, contains a `]`, and nothing but spaces/tabs follows the first
//! `]`. A line is a key/value candidate if it has an `=` after position 0.

/// Blank lines and lines starting with `#` or `;`.
pub(crate) fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with(';')
}

/// Returns the byte index of the closing `]` when `line` is a group header.
pub(crate) fn group_header_end(line: &str) -> Option<usize> {
    if !line.starts_with('[') {
        return None;
    }
    let end = line.find(']')?;
    if line[end + 1..].chars().all(|c| c == ' ' || c == '\t') { Some(end) } else { None }
}

/// Returns the byte index of the first `=` when `line` looks like `key=value`.
pub(crate) fn key_value_split(line: &str) -> Option<usize> {
    match line.find('=') {
        Some(0) | None => None,
        Some(p) => Some(p),
    }
}

/// Character index of the first character that makes `name` an invalid group
/// name, or `Some(0)` for an empty name.
pub(crate) fn invalid_group_char(name: &str) -> Option<usize> {
    if name.is_empty() {
        return Some(0);
    }
    name.chars().position(|c| c == '[' || c == ']' || c.is_control())
}

/// Character index of the first offending character of `key`.
pub(crate) fn invalid_key_char(key: &str) -> Option<usize> {
    if key.is_empty() {
        return Some(0);
    }
    if let Some(p) = key.chars().position(|c| c == '=') {
        return Some(p);
    }
    if key.starts_with(' ') {
        return Some(0);
    }
    if key.ends_with(' ') {
        return Some(key.chars().count() - 1);
    }
    None
}

/// Number of leading whitespace characters, in characters.
pub(crate) fn indent(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments() {
        assert!(is_comment(""));
        assert!(is_comment("# hello"));
        assert!(is_comment("; hello"));
        assert!(!is_comment("Key=#value"));
    }

    #[test]
    fn group_headers() {
        assert_eq!(group_header_end("[Container]"), Some(10));
        assert_eq!(group_header_end("[Container] \t"), Some(10));
        assert_eq!(group_header_end("[Container] x"), None);
        assert_eq!(group_header_end("[Container"), None);
        assert_eq!(group_header_end("Container]"), None);
        assert_eq!(group_header_end("[Foo]=bar"), None);
    }

    #[test]
    fn key_values() {
        assert_eq!(key_value_split("Image=x"), Some(5));
        assert_eq!(key_value_split("A=b=c"), Some(1));
        assert_eq!(key_value_split("=x"), None);
        assert_eq!(key_value_split("no equals"), None);
    }

    #[test]
    fn names() {
        assert_eq!(invalid_group_char("Container"), None);
        assert_eq!(invalid_group_char(""), Some(0));
        assert_eq!(invalid_group_char("a[b"), Some(1));
        assert_eq!(invalid_group_char("a\u{1}"), Some(1));

        assert_eq!(invalid_key_char("Image"), None);
        assert_eq!(invalid_key_char("My Key"), None);
        assert_eq!(invalid_key_char(" Key"), Some(0));
        assert_eq!(invalid_key_char("Key "), Some(3));
        assert_eq!(invalid_key_char(""), Some(0));
    }
}
