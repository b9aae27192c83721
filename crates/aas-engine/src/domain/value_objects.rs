//! # Value Objects
//!
//! Validated inputs to the addition core. Every constructor enforces the
//! range and length rules, so downstream code never re-checks them.

use std::fmt;

use super::errors::DomainError;

/// Largest value a single digit may hold.
pub const MAX_DIGIT: u16 = 999;

/// Numeric base of a digit sequence.
pub const BASE: u16 = MAX_DIGIT + 1;

/// Maximum number of digits in one operand.
pub const N_MAX: usize = 100;

/// A single base-1000 digit in `[0, MAX_DIGIT]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u16);

impl Digit {
    /// Zero digit.
    pub const ZERO: Digit = Digit(0);

    /// One digit (the only possible value of an overflow digit).
    pub const ONE: Digit = Digit(1);

    /// Largest digit.
    pub const MAX: Digit = Digit(MAX_DIGIT);

    /// Create a digit, rejecting values above [`MAX_DIGIT`].
    pub fn new(value: u16) -> Result<Self, DomainError> {
        if value > MAX_DIGIT {
            return Err(DomainError::DigitOutOfRange {
                value: u32::from(value),
                max: MAX_DIGIT,
            });
        }
        Ok(Self(value))
    }

    /// Wrap a value already known to be in range.
    pub(crate) fn from_bounded(value: u16) -> Self {
        debug_assert!(value <= MAX_DIGIT, "digit {} escaped the base", value);
        Self(value)
    }

    /// Numeric value.
    pub fn value(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Digit {
    type Error = DomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Digit::new(value)
    }
}

impl From<Digit> for u16 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Most-significant-first sequence of 1 to [`N_MAX`] digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigitSequence {
    digits: Vec<Digit>,
}

impl DigitSequence {
    /// Create a sequence, enforcing the length bounds.
    pub fn new(digits: Vec<Digit>) -> Result<Self, DomainError> {
        if digits.is_empty() {
            return Err(DomainError::EmptySequence);
        }
        if digits.len() > N_MAX {
            return Err(DomainError::SequenceTooLong {
                len: digits.len(),
                max: N_MAX,
            });
        }
        Ok(Self { digits })
    }

    /// Create a sequence from raw values, validating each digit.
    pub fn from_values(values: &[u16]) -> Result<Self, DomainError> {
        let digits = values
            .iter()
            .map(|&v| Digit::new(v))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(digits)
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always false; sequences hold at least one digit.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Digits, most significant first.
    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }
}

/// A pair of equal-length operands, ready for the addition core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operands {
    first: DigitSequence,
    second: DigitSequence,
}

impl Operands {
    /// Pair two sequences, rejecting unequal lengths.
    pub fn new(first: DigitSequence, second: DigitSequence) -> Result<Self, DomainError> {
        if first.len() != second.len() {
            return Err(DomainError::LengthMismatch {
                first: first.len(),
                second: second.len(),
            });
        }
        Ok(Self { first, second })
    }

    /// First operand.
    pub fn first(&self) -> &DigitSequence {
        &self.first
    }

    /// Second operand.
    pub fn second(&self) -> &DigitSequence {
        &self.second
    }

    /// Shared digit count `n`.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    /// Always false; operands hold at least one digit.
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Digit pairs by position, most significant first.
    pub fn pairs(&self) -> impl Iterator<Item = (Digit, Digit)> + '_ {
        self.first
            .digits()
            .iter()
            .copied()
            .zip(self.second.digits().iter().copied())
    }
}
