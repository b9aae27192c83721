//! # Domain Errors
//!
//! Failures raised while constructing digits, sequences and operand pairs.
//! Once an [`Operands`](super::Operands) exists, none of these can occur.

use thiserror::Error;

/// Construction errors for domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A digit value exceeded the base.
    #[error("Digit out of range: {value} > {max}")]
    DigitOutOfRange {
        /// Offending value
        value: u32,
        /// Largest allowed digit
        max: u16,
    },

    /// A sequence had no digits.
    #[error("Digit sequence is empty")]
    EmptySequence,

    /// A sequence exceeded the maximum digit count.
    #[error("Digit sequence too long: {len} > {max}")]
    SequenceTooLong {
        /// Number of digits supplied
        len: usize,
        /// Maximum digit count
        max: usize,
    },

    /// The two operands had different digit counts.
    #[error("Operand length mismatch: {first} != {second}")]
    LengthMismatch {
        /// Digits in the first operand
        first: usize,
        /// Digits in the second operand
        second: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_out_of_range_message() {
        let err = DomainError::DigitOutOfRange {
            value: 1000,
            max: 999,
        };
        assert!(err.to_string().contains("1000 > 999"));
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = DomainError::LengthMismatch {
            first: 3,
            second: 2,
        };
        assert!(err.to_string().contains("3 != 2"));
    }
}
