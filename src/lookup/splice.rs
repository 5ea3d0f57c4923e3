//! Continuation splicing with a position map.
//!
//! A raw value such as `--foo \` + newline + `  --bar` spans two physical
//! lines. Splicing removes each `\` + newline pair and records where every
//! physical segment starts in the spliced text, so any character offset can
//! be mapped back to its source line and column:
//!
//! ```text
//! raw:      "--foo \⏎  --bar"        line 7, column 11
//! spliced:  "--foo   --bar"
//! anchors:  [0 → 7:11] [6 → 8:0]
//! ```

use crate::{Location, UnitValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    offset: usize,
    location: Location,
}

/// A value with continuation markers removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spliced {
    text: String,
    anchors: Vec<Anchor>,
}

impl Spliced {
    pub(crate) fn new(value: &UnitValue) -> Self {
        let mut text = String::with_capacity(value.value.len());
        let mut anchors = vec![Anchor { offset: 0, location: value.location() }];
        let mut offset = 0;
        let mut line = value.line;

        let mut chars = value.value.chars().peekable();
        while let Some(c) = chars.next() {
            let newline = match c {
                '\\' if chars.peek() == Some(&'\n') => {
                    chars.next();
                    true
                }
                '\n' => {
                    text.push(c);
                    offset += 1;
                    true
                }
                _ => {
                    text.push(c);
                    offset += 1;
                    false
                }
            };
            if newline {
                line += 1;
                anchors.push(Anchor { offset, location: Location::new(line, 0) });
            }
        }

        Self { text, anchors }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Source position of the character at `offset` in the spliced text.
    pub(crate) fn locate(&self, offset: usize) -> Location {
        // The first anchor is at offset 0, so the partition point is at least 1.
        let idx = self.anchors.partition_point(|a| a.offset <= offset).saturating_sub(1);
        let anchor = self.anchors[idx];
        Location::new(anchor.location.line, anchor.location.column + (offset - anchor.offset))
    }

    /// A value holding `text[start..]`-style content that begins at `offset`.
    pub(crate) fn value_at(&self, key: &str, text: impl Into<String>, offset: usize) -> UnitValue {
        let at = self.locate(offset);
        UnitValue::new(key, text, at.line, at.column)
    }

    pub(crate) fn into_value(self, key: &str) -> UnitValue {
        let at = self.locate(0);
        UnitValue::new(key, self.text, at.line, at.column)
    }
}
