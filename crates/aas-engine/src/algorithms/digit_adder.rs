//! # Digit Adder
//!
//! Single-position addition with local carry detection.

use crate::domain::{Digit, DigitSum, BASE, MAX_DIGIT};

/// Add two digits at one position.
///
/// `a + b` is at most `2 * MAX_DIGIT`, so one subtraction of the base always
/// brings the sum back into range.
pub fn add_digits(a: Digit, b: Digit) -> DigitSum {
    let total = a.value() + b.value();
    if total > MAX_DIGIT {
        DigitSum::new(total - BASE, true)
    } else {
        DigitSum::new(total, false)
    }
}
