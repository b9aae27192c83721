//! # Digit Codec
//!
//! Text ⇄ digit sequences.
//!
//! Input: integers separated by one or more spaces. A token is an optional
//! `+`/`-` sign followed by decimal digits; its value must be in `[0, 999]`,
//! so `-0`, `+7` and `007` are all accepted.
//!
//! Output: digits separated by single spaces, newline terminated, capped at a
//! byte budget.

use aas_engine::{Digit, DigitSequence, MAX_DIGIT};

use crate::errors::InputError;

/// Parse one validated operand from a line of text.
pub fn parse_digits(line: &str) -> Result<DigitSequence, InputError> {
    let digits = line
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(parse_token)
        .collect::<Result<Vec<_>, _>>()?;

    DigitSequence::new(digits).map_err(InputError::from)
}

fn parse_token(token: &str) -> Result<Digit, InputError> {
    let magnitude = token.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(token);
    if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::InvalidContent {
            token: token.to_string(),
        });
    }

    // Overlong digit strings fail to parse and count as out of range.
    match token.parse::<i64>() {
        Ok(value) if (0..=i64::from(MAX_DIGIT)).contains(&value) => {
            Digit::new(value as u16).map_err(InputError::from)
        }
        _ => Err(InputError::OutOfRange {
            token: token.to_string(),
        }),
    }
}

/// A formatted sum, ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedSum {
    /// Space-separated digits with a trailing newline.
    pub line: String,
    /// Number of digits that made it into `line`.
    pub written: usize,
    /// True when trailing digits were dropped to respect the byte budget.
    pub truncated: bool,
}

/// Format digits into one line of at most `max_line_bytes` bytes, newline
/// included. The first digit is always written.
pub fn format_digits(digits: &[Digit], max_line_bytes: usize) -> FormattedSum {
    let mut line = String::with_capacity(max_line_bytes);
    let mut written = 0;
    let mut truncated = false;

    for digit in digits {
        let token = digit.to_string();
        let separator = usize::from(written > 0);
        if written > 0 && line.len() + separator + token.len() + 1 > max_line_bytes {
            truncated = true;
            break;
        }
        if separator == 1 {
            line.push(' ');
        }
        line.push_str(&token);
        written += 1;
    }
    line.push('\n');

    FormattedSum {
        line,
        written,
        truncated,
    }
}
