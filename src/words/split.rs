//! Word extraction.
//!
//! The extractor is a small state machine over the input characters:
//!
//! ```text
//! skip separators ──▶ scan ──┬─ plain char           -> append
//!                            ├─ quote (if quoting)   -> enter/leave quoted state
//!                            ├─ backslash            -> decode on next char
//!                            └─ separator (unquoted) -> word ends
//! ```
//!
//! Running out of input while quoted or after a lone backslash is an error
//! unless the flags relax it.

use super::escape::{EscapeError, unescape_one};
use super::flags::SplitFlags;
use thiserror::Error;

/// A word and the character offset in the input where its source text starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub offset: usize,
}

/// Outcome of a single [`extract_first_word`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<'a> {
    /// `None` when the input held no further word.
    pub word: Option<Word>,
    /// Unconsumed input; `None` once the input is exhausted.
    pub rest: Option<&'a str>,
}

impl Extracted<'_> {
    pub fn has_more(&self) -> bool {
        self.rest.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("unbalanced quote starting at offset {offset}")]
    UnbalancedQuote { offset: usize },
    #[error("unbalanced escape at offset {offset}")]
    UnbalancedEscape { offset: usize },
    #[error("invalid escape at offset {offset}: {source}")]
    InvalidEscape {
        offset: usize,
        #[source]
        source: EscapeError,
    },
}

impl SplitError {
    /// Character offset in the input where the failure was detected.
    pub fn offset(&self) -> usize {
        match self {
            SplitError::UnbalancedQuote { offset }
            | SplitError::UnbalancedEscape { offset }
            | SplitError::InvalidEscape { offset, .. } => *offset,
        }
    }
}

struct Step {
    word: Option<Word>,
    next: Option<usize>,
}

/// Extract the first word of `input`.
///
/// `separators` lists the characters that end a word (see
/// [`WHITESPACE`](super::WHITESPACE)).
pub fn extract_first_word<'a>(input: &'a str, separators: &str, flags: SplitFlags) -> Result<Extracted<'a>, SplitError> {
    let chars: Vec<char> = input.chars().collect();
    let seps: Vec<char> = separators.chars().collect();
    let step = extract(&chars, 0, &seps, flags)?;

    let rest = step.next.map(|n| match input.char_indices().nth(n) {
        Some((byte, _)) => &input[byte..],
        None => "",
    });

    Ok(Extracted { word: step.word, rest })
}

/// Split `value` into all of its words.
pub fn split_all(value: &str, separators: &str, flags: SplitFlags) -> Result<Vec<Word>, SplitError> {
    Splitter::new(value, separators, flags).collect()
}

/// Iterator form of [`split_all`]; yields words until the input is exhausted or
/// an error occurs (the error is the last item).
///
/// `RETAIN_SEPARATORS` only shapes the rest of a single extraction, so the
/// iterator always steps past the separator that ended a word.
pub(crate) struct Splitter {
    chars: Vec<char>,
    seps: Vec<char>,
    flags: SplitFlags,
    cursor: Option<usize>,
}

impl Splitter {
    pub(crate) fn new(value: &str, separators: &str, flags: SplitFlags) -> Self {
        let flags = flags - SplitFlags::RETAIN_SEPARATORS;
        Self { chars: value.chars().collect(), seps: separators.chars().collect(), flags, cursor: Some(0) }
    }
}

impl Iterator for Splitter {
    type Item = Result<Word, SplitError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor?;
        match extract(&self.chars, cursor, &self.seps, self.flags) {
            Ok(step) => {
                self.cursor = step.next;
                step.word.map(Ok)
            }
            Err(e) => {
                self.cursor = None;
                Some(Err(e))
            }
        }
    }
}

fn finish(buf: Vec<u8>, offset: usize, next: Option<usize>) -> Step {
    let text = match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    Step { word: Some(Word { text, offset }), next }
}

fn push_char(buf: &mut Vec<u8>, c: char) {
    let mut tmp = [0u8; 4];
    buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
}

fn extract(chars: &[char], start: usize, seps: &[char], flags: SplitFlags) -> Result<Step, SplitError> {
    let is_sep = |c: char| seps.contains(&c);
    let coalesce = !flags.contains(SplitFlags::DONT_COALESCE_SEPARATORS);
    let retain_seps = flags.contains(SplitFlags::RETAIN_SEPARATORS);
    let mut pos = start;

    // Leading separators.
    loop {
        let Some(&c) = chars.get(pos) else {
            // Without coalescing, an exhausted input still yields one empty word.
            return Ok(if coalesce { Step { word: None, next: None } } else { finish(Vec::new(), pos, None) });
        };
        if !is_sep(c) {
            break;
        }
        if !coalesce {
            let next = if retain_seps { pos } else { pos + 1 };
            return Ok(finish(Vec::new(), pos, Some(next)));
        }
        pos += 1;
    }

    let offset = pos;
    let mut buf: Vec<u8> = Vec::new();
    let mut quote: Option<char> = None;
    let mut quote_start = pos;
    let mut backslash = false;

    loop {
        if backslash {
            let Some(c) = chars.get(pos).copied() else {
                if flags.contains(SplitFlags::UNESCAPE_RELAX) && (quote.is_none() || flags.contains(SplitFlags::RELAX)) {
                    buf.push(b'\\');
                    return Ok(finish(buf, offset, None));
                }
                if flags.contains(SplitFlags::RELAX) {
                    return Ok(finish(buf, offset, None));
                }
                return Err(SplitError::UnbalancedEscape { offset: pos - 1 });
            };

            if flags.intersects(SplitFlags::CUNESCAPE | SplitFlags::UNESCAPE_SEPARATORS) {
                let decoded = if flags.contains(SplitFlags::CUNESCAPE) {
                    unescape_one(&chars[pos..], false)
                } else {
                    Err(EscapeError::Unknown(c))
                };
                match decoded {
                    Ok((value, consumed)) => {
                        value.push_to(&mut buf);
                        pos += consumed - 1;
                    }
                    Err(source) => {
                        if flags.contains(SplitFlags::UNESCAPE_SEPARATORS) && (is_sep(c) || c == '\\') {
                            push_char(&mut buf, c);
                        } else if flags.contains(SplitFlags::UNESCAPE_RELAX) {
                            buf.push(b'\\');
                            push_char(&mut buf, c);
                        } else {
                            return Err(SplitError::InvalidEscape { offset: pos - 1, source });
                        }
                    }
                }
            } else {
                push_char(&mut buf, c);
            }

            backslash = false;
            pos += 1;
        } else if let Some(q) = quote {
            loop {
                let Some(c) = chars.get(pos).copied() else {
                    if flags.contains(SplitFlags::RELAX) {
                        return Ok(finish(buf, offset, None));
                    }
                    return Err(SplitError::UnbalancedQuote { offset: quote_start });
                };
                if c == q {
                    quote = None;
                    if flags.contains(SplitFlags::UNQUOTE) {
                        break;
                    }
                } else if c == '\\' && flags.escaping() {
                    backslash = true;
                    break;
                }
                push_char(&mut buf, c);
                if quote.is_none() {
                    break;
                }
                pos += 1;
            }
            pos += 1;
        } else {
            loop {
                let Some(c) = chars.get(pos).copied() else {
                    return Ok(finish(buf, offset, None));
                };
                if (c == '\'' || c == '"') && flags.quoting() {
                    quote = Some(c);
                    quote_start = pos;
                    if flags.contains(SplitFlags::UNQUOTE) {
                        break;
                    }
                } else if c == '\\' && flags.escaping() {
                    backslash = true;
                    break;
                } else if is_sep(c) {
                    if !coalesce {
                        let next = if retain_seps { pos } else { pos + 1 };
                        return Ok(finish(buf, offset, Some(next)));
                    }
                    if !retain_seps {
                        loop {
                            pos += 1;
                            match chars.get(pos) {
                                None => return Ok(finish(buf, offset, None)),
                                Some(&c) if !is_sep(c) => break,
                                Some(_) => {}
                            }
                        }
                    }
                    return Ok(finish(buf, offset, Some(pos)));
                }
                push_char(&mut buf, c);
                if quote.is_some() {
                    break;
                }
                pos += 1;
            }
            pos += 1;
        }
    }
}
