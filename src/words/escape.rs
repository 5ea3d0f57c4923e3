//! Single escape-sequence decoding.
//!
//! ```text
//! input (after the backslash)   output        consumed
//! n                             Char('\n')    1
//! x41                           Byte(0x41)    3
//! 101                           Byte(0x41)    3
//! u00e9                         Char('é')     5
//! U0001F600                     Char('😀')    9
//! ```

use thiserror::Error;

/// Result of decoding one escape.
///
/// `\x` and octal escapes produce raw bytes (they may be one part of a UTF-8
/// sequence); the other escapes produce whole characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unescaped {
    Byte(u8),
    Char(char),
}

impl Unescaped {
    /// Append the decoded value to a byte buffer.
    pub fn push_to(self, out: &mut Vec<u8>) {
        match self {
            Unescaped::Byte(b) => out.push(b),
            Unescaped::Char(c) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    #[error("escape sequence is truncated")]
    Truncated,
    #[error("invalid digit '{0}' in escape sequence")]
    InvalidDigit(char),
    #[error("escape sequence decodes to NUL")]
    Nul,
    #[error("escape sequence value {0:#x} is out of range")]
    OutOfRange(u32),
    #[error("unknown escape sequence '\\{0}'")]
    Unknown(char),
}

/// Decode the escape whose first character (the one following the backslash)
/// is `input[0]`.
///
/// Returns the decoded value and the number of characters consumed from
/// `input` (1, 3, 5 or 9). A decoded zero is rejected unless `accept_nul`.
pub fn unescape_one(input: &[char], accept_nul: bool) -> Result<(Unescaped, usize), EscapeError> {
    let Some(&first) = input.first() else {
        return Err(EscapeError::Truncated);
    };

    let named = match first {
        'a' => Some('\u{7}'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{b}'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '\'' => Some('\''),
        's' => Some(' '),
        _ => None,
    };
    if let Some(c) = named {
        return Ok((Unescaped::Char(c), 1));
    }

    match first {
        'x' => {
            let value = digits(&input[1..], 2, 16)?;
            if value == 0 && !accept_nul {
                return Err(EscapeError::Nul);
            }
            Ok((Unescaped::Byte(value as u8), 3))
        }
        'u' => {
            let value = digits(&input[1..], 4, 16)?;
            Ok((Unescaped::Char(code_point(value, accept_nul)?), 5))
        }
        'U' => {
            let value = digits(&input[1..], 8, 16)?;
            Ok((Unescaped::Char(code_point(value, accept_nul)?), 9))
        }
        '0'..='7' => {
            let value = digits(input, 3, 8)?;
            if value == 0 && !accept_nul {
                return Err(EscapeError::Nul);
            }
            if value > 0xff {
                return Err(EscapeError::OutOfRange(value));
            }
            Ok((Unescaped::Byte(value as u8), 3))
        }
        other => Err(EscapeError::Unknown(other)),
    }
}

fn digits(input: &[char], count: usize, radix: u32) -> Result<u32, EscapeError> {
    if input.len() < count {
        return Err(EscapeError::Truncated);
    }
    input[..count].iter().try_fold(0u32, |acc, &c| {
        let d = c.to_digit(radix).ok_or(EscapeError::InvalidDigit(c))?;
        Ok(acc * radix + d)
    })
}

fn code_point(value: u32, accept_nul: bool) -> Result<char, EscapeError> {
    if value == 0 && !accept_nul {
        return Err(EscapeError::Nul);
    }
    char::from_u32(value).ok_or(EscapeError::OutOfRange(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(s: &str) -> Result<(Unescaped, usize), EscapeError> {
        let chars: Vec<char> = s.chars().collect();
        unescape_one(&chars, false)
    }

    #[test]
    fn named_escapes() {
        assert_eq!(run("n"), Ok((Unescaped::Char('\n'), 1)));
        assert_eq!(run("s"), Ok((Unescaped::Char(' '), 1)));
        assert_eq!(run("\\rest"), Ok((Unescaped::Char('\\'), 1)));
        assert_eq!(run("v"), Ok((Unescaped::Char('\u{b}'), 1)));
    }

    #[test]
    fn numeric_escapes_decode_to_a() {
        assert_eq!(run("x41"), Ok((Unescaped::Byte(b'A'), 3)));
        assert_eq!(run("101"), Ok((Unescaped::Byte(b'A'), 3)));
        assert_eq!(run("u0041"), Ok((Unescaped::Char('A'), 5)));
        assert_eq!(run("U00000041"), Ok((Unescaped::Char('A'), 9)));
    }

    #[test]
    fn malformed_escapes_fail() {
        assert_eq!(run("xZZ"), Err(EscapeError::InvalidDigit('Z')));
        assert_eq!(run("x4"), Err(EscapeError::Truncated));
        assert_eq!(run("q"), Err(EscapeError::Unknown('q')));
        assert_eq!(run(""), Err(EscapeError::Truncated));
        assert_eq!(run("777"), Err(EscapeError::OutOfRange(0o777)));
        assert_eq!(run("U00110000"), Err(EscapeError::OutOfRange(0x110000)));
    }

    #[test]
    fn nul_requires_opt_in() {
        assert_eq!(run("x000"), Err(EscapeError::Nul));
        assert_eq!(run("000"), Err(EscapeError::Nul));
        assert_eq!(run("u0000"), Err(EscapeError::Nul));

        let chars: Vec<char> = "x000".chars().collect();
        assert_eq!(unescape_one(&chars, true), Ok((Unescaped::Byte(0), 3)));
    }

    #[test]
    fn multibyte_output() {
        let mut out = Vec::new();
        run("u00e9").unwrap().0.push_to(&mut out);
        assert_eq!(String::from_utf8(out).unwrap(), "é");
    }
}
