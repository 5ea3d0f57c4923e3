//! Lookup-mode dispatch.

use super::result::{LookupResult, SplitIssue};
use super::splice::Spliced;
use crate::words::{SplitFlags, Splitter, WHITESPACE};
use crate::{Field, LookupMode, UnitFile, UnitValue};

const TRUE_WORDS: [&str; 4] = ["1", "yes", "true", "on"];

/// Resolve `field` against `unit`.
///
/// A missing group or key resolves to an empty result in every mode.
pub fn lookup(unit: &UnitFile, field: &Field) -> LookupResult {
    let result = match field.mode {
        LookupMode::LastRaw => LookupResult::new(last(unit, field).cloned().into_iter().collect(), Vec::new()),
        LookupMode::Last => LookupResult::new(last(unit, field).map(|v| spliced(v, &field.key)).into_iter().collect(), Vec::new()),
        LookupMode::Base => LookupResult::new(last(unit, field).map(|v| base(v, &field.key)).into_iter().collect(), Vec::new()),
        LookupMode::Boolean => LookupResult::new(last(unit, field).map(|v| base(v, &field.key)).into_iter().collect(), Vec::new()),
        LookupMode::Int => {
            let value = last(unit, field).map(|v| base(v, &field.key)).filter(|v| parse_int(&v.value).is_some());
            LookupResult::new(value.into_iter().collect(), Vec::new())
        }
        LookupMode::AllRaw => LookupResult::new(all_raw(unit, field).into_iter().cloned().collect(), Vec::new()),
        LookupMode::All => {
            LookupResult::new(all_raw(unit, field).into_iter().map(|v| spliced(v, &field.key)).collect(), Vec::new())
        }
        LookupMode::AllStrv => split(all_raw(unit, field), field, WHITESPACE, SplitFlags::STRV, false),
        LookupMode::AllArgs => split(all_raw(unit, field), field, WHITESPACE, SplitFlags::ARGS, false),
        LookupMode::LastArgs => split(last(unit, field).into_iter().collect(), field, WHITESPACE, SplitFlags::ARGS, false),
        LookupMode::AllKeyVal => split(all_raw(unit, field), field, WHITESPACE, SplitFlags::ARGS, true),
    };
    tracing::trace!(field = %field, mode = ?field.mode, values = result.len(), "resolved field");
    result
}

fn last<'a>(unit: &'a UnitFile, field: &Field) -> Option<&'a UnitValue> {
    unit.group(&field.group)?.values(&field.key).next_back()
}

/// Every occurrence in order; an empty occurrence discards the ones before it.
fn all_raw<'a>(unit: &'a UnitFile, field: &Field) -> Vec<&'a UnitValue> {
    let Some(group) = unit.group(&field.group) else {
        return Vec::new();
    };
    group.values(&field.key).fold(Vec::new(), |mut acc, v| {
        if v.value.is_empty() {
            acc.clear();
        } else {
            acc.push(v);
        }
        acc
    })
}

fn spliced(value: &UnitValue, key: &str) -> UnitValue {
    Spliced::new(value).into_value(key)
}

fn base(value: &UnitValue, key: &str) -> UnitValue {
    let spliced = Spliced::new(value);
    let trimmed = spliced.text().trim_end();
    match trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(inner) => spliced.value_at(key, inner, 1),
        None => spliced.value_at(key, trimmed, 0),
    }
}

fn split(values: Vec<&UnitValue>, field: &Field, separators: &str, flags: SplitFlags, key_val: bool) -> LookupResult {
    let mut words = Vec::new();
    let mut issues = Vec::new();

    for value in values {
        let spliced = Spliced::new(value);
        for item in Splitter::new(spliced.text(), separators, flags) {
            match item {
                Ok(word) if key_val => {
                    // Words without `=` carry no pair.
                    if let Some((key, val)) = word.text.split_once('=') {
                        let at = spliced.locate(word.offset);
                        words.push(UnitValue::new(key, val, at.line, at.column));
                    }
                }
                Ok(word) => words.push(spliced.value_at(&field.key, word.text, word.offset)),
                Err(error) => {
                    let location = spliced.locate(error.offset());
                    tracing::warn!(field = %field, %location, %error, "failed to split value");
                    issues.push(SplitIssue { location, error });
                }
            }
        }
    }

    LookupResult::new(words, issues)
}

/// Boolean coercion of a resolved value.
pub(crate) fn is_true(value: &str) -> bool {
    TRUE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(value))
}

/// Integer parse with C `strtol` base-0 prefixes; the whole string must parse.
pub(crate) fn parse_int(value: &str) -> Option<i64> {
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let (radix, digits) = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, hex)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
