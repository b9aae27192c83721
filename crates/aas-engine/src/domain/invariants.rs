//! # Domain Invariants
//!
//! Rules every resolved sum must satisfy. The carry resolver checks them in
//! debug builds; tests check them everywhere.

use super::value_objects::{Digit, MAX_DIGIT};

/// Invariant: a digit never exceeds [`MAX_DIGIT`] after carry handling.
pub fn invariant_digit_bound(value: u16) -> bool {
    value <= MAX_DIGIT
}

/// Invariant: addition of two `input_len`-digit operands grows the digit
/// count by at most one, and a grown result leads with exactly 1.
///
/// Two operands of `n` digits sum to at most `2 * (BASE^n - 1)`, which is
/// below `2 * BASE^n`, so only a single carry unit can escape position 0.
pub fn invariant_growth(input_len: usize, output: &[Digit]) -> bool {
    if output.len() == input_len {
        return true;
    }
    output.len() == input_len + 1 && output.first() == Some(&Digit::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_bound() {
        assert!(invariant_digit_bound(0));
        assert!(invariant_digit_bound(999));
        assert!(!invariant_digit_bound(1000));
    }

    #[test]
    fn test_growth_same_length() {
        assert!(invariant_growth(2, &[Digit::MAX, Digit::MAX]));
    }

    #[test]
    fn test_growth_by_one_with_leading_one() {
        assert!(invariant_growth(1, &[Digit::ONE, Digit::ZERO]));
    }

    #[test]
    fn test_growth_leading_digit_must_be_one() {
        let two = Digit::new(2).unwrap();
        assert!(!invariant_growth(1, &[two, Digit::ZERO]));
    }

    #[test]
    fn test_growth_by_two_rejected() {
        assert!(!invariant_growth(1, &[Digit::ONE, Digit::ZERO, Digit::ZERO]));
    }

    #[test]
    fn test_shrink_rejected() {
        assert!(!invariant_growth(2, &[Digit::ONE]));
    }
}
