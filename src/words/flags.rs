//! Word-splitting flags.
//!
//! Each flag is an independent switch; combinations are meaningful (for
//! example `UNQUOTE | CUNESCAPE | RELAX` is the exec-style argument splitter).

/// Default separators: space, tab, newline and carriage return.
pub const WHITESPACE: &str = " \t\n\r";

bitflags::bitflags! {
    /// Switches controlling [`extract_first_word`](super::extract_first_word).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SplitFlags: u16 {
        /// Unbalanced quotes or a trailing backslash end the word instead of failing.
        const RELAX                    = 1 << 0;
        /// Decode C-style escape sequences.
        const CUNESCAPE                = 1 << 1;
        /// Keep unknown escapes and a trailing backslash verbatim.
        const UNESCAPE_RELAX           = 1 << 2;
        /// Only unescape separators and the backslash itself.
        const UNESCAPE_SEPARATORS      = 1 << 3;
        /// Quotes group words but stay in the output.
        const KEEP_QUOTE               = 1 << 4;
        /// Quotes group words and are removed.
        const UNQUOTE                  = 1 << 5;
        /// Every separator ends a word, producing empty words between runs.
        const DONT_COALESCE_SEPARATORS = 1 << 6;
        /// Backslash is an ordinary character.
        const RETAIN_ESCAPE            = 1 << 7;
        /// Leave trailing separators in the remainder.
        const RETAIN_SEPARATORS        = 1 << 8;

        /// String-vector splitting: quotes removed, escapes left as written.
        const STRV = Self::RETAIN_ESCAPE.bits() | Self::UNQUOTE.bits();
        /// Exec-style argument splitting.
        const ARGS = Self::RELAX.bits() | Self::UNQUOTE.bits() | Self::CUNESCAPE.bits();
    }
}

impl SplitFlags {
    /// Whether quote characters open a quoted section.
    pub(crate) fn quoting(self) -> bool {
        self.intersects(SplitFlags::KEEP_QUOTE | SplitFlags::UNQUOTE)
    }

    /// Whether a backslash starts an escape.
    pub(crate) fn escaping(self) -> bool {
        !self.contains(SplitFlags::RETAIN_ESCAPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_combinations_of_switches() {
        assert!(SplitFlags::ARGS.contains(SplitFlags::RELAX));
        assert!(SplitFlags::ARGS.contains(SplitFlags::CUNESCAPE));
        assert!(SplitFlags::ARGS.quoting());
        assert!(SplitFlags::ARGS.escaping());

        assert!(SplitFlags::STRV.quoting());
        assert!(!SplitFlags::STRV.escaping());
        assert!(!SplitFlags::empty().quoting());
    }
}
